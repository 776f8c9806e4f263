pub mod file;
pub mod forwarder;

pub use file::SalesMirror;
pub use forwarder::{MirrorEvent, MirrorForwarder, MirrorHandle};

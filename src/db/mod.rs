pub mod pool;
pub mod queries;

pub use pool::{create_pool, Store, STORE_NAME, STORE_VERSION};
pub use queries::*;

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod mirror;
pub mod models;
pub mod service;

pub use app::App;
pub use config::AppConfig;
pub use db::{create_pool, Store};
pub use error::{AppError, Result};
pub use service::{InventoryService, RowMapper, ScanService};

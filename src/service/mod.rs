pub mod inventory;
pub mod row_mapper;
pub mod scanner;
pub mod stats;
pub mod upload;

pub use inventory::InventoryService;
pub use row_mapper::{ColumnAliases, RowMapper};
pub use scanner::{ScanOutcome, ScanService};
pub use stats::{compute_report, compute_stats, DashboardService};

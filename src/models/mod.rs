pub mod inventory;
pub mod label;
pub mod row;
pub mod sale;
pub mod stats;

pub use inventory::{InventoryItem, InventoryPatch, DEFAULT_CATEGORY};
pub use label::{Label, LabelGroup, LabelPayload, LabelSheet};
pub use row::{CellValue, RawRow};
pub use sale::{MirroredSale, NewSale, SaleRecord};
pub use stats::{DashboardStats, ProductReport, ProductStat, SalesReport};

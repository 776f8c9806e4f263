use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::InventoryItem;

/// 销售记录 (sales)，sale_id 由存储自增分配
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub sale_id: i64,
    pub item_id: String,
    pub name: String, // 售出时的商品名称快照
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub timestamp: String,
}

/// 待写入的销售记录 (尚未分配 sale_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub timestamp: String,
}

impl NewSale {
    /// 以当前时间为商品生成一条销售
    pub fn for_item(item: &InventoryItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            cost: item.cost,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn with_id(self, sale_id: i64) -> SaleRecord {
        SaleRecord {
            sale_id,
            item_id: self.item_id,
            name: self.name,
            price: self.price,
            cost: self.cost,
            timestamp: self.timestamp,
        }
    }
}

/// 服务端镜像文件中的销售记录 (无 sale_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirroredSale {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub timestamp: String,
}

impl From<&SaleRecord> for MirroredSale {
    fn from(sale: &SaleRecord) -> Self {
        Self {
            item_id: sale.item_id.clone(),
            name: sale.name.clone(),
            price: sale.price,
            cost: sale.cost,
            timestamp: sale.timestamp.clone(),
        }
    }
}

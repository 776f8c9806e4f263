use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// 默认分类
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// 库存商品 (inventory)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub quantity: i64, // 当前库存数量
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl InventoryItem {
    /// 应用部分更新，未提供的字段保持原值
    pub fn apply(&mut self, patch: InventoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if self.category.is_empty() {
            self.category = default_category();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        // 库存不能为负
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity.max(0);
        }
    }
}

/// 库存部分更新请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// 缺省: 不修改; `null`: 清除成本
    #[serde(default, deserialize_with = "present_or_null")]
    pub cost: Option<Option<f64>>,
    pub quantity: Option<i64>,
}

/// 区分字段缺失与显式 null
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

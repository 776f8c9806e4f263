use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::InventoryItem;

/// 二维码内容 `{"id":..,"name":..}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPayload {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LabelPayload {
    /// 解析扫码文本，id 缺失或为空时返回 None
    pub fn decode(text: &str) -> Option<Self> {
        let payload: LabelPayload = serde_json::from_str(text.trim()).ok()?;
        if payload.id.is_empty() {
            return None;
        }
        Some(payload)
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// 单个标签
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub price_text: String,
    pub payload: String,
}

impl From<&InventoryItem> for Label {
    fn from(item: &InventoryItem) -> Self {
        let payload = LabelPayload {
            id: item.id.clone(),
            name: Some(item.name.clone()),
        };
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            price_text: format!("${:.2}", item.price),
            payload: payload.encode(),
        }
    }
}

/// 同一分类下的标签
#[derive(Debug, Clone, Serialize)]
pub struct LabelGroup {
    pub category: String,
    pub labels: Vec<Label>,
}

/// 打印用标签页，按分类首次出现顺序分组
#[derive(Debug, Clone, Serialize)]
pub struct LabelSheet {
    pub categories: Vec<LabelGroup>,
}

impl LabelSheet {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let mut grouped: IndexMap<String, Vec<Label>> = IndexMap::new();
        for item in items {
            grouped
                .entry(item.category.clone())
                .or_default()
                .push(Label::from(item));
        }

        Self {
            categories: grouped
                .into_iter()
                .map(|(category, labels)| LabelGroup { category, labels })
                .collect(),
        }
    }
}

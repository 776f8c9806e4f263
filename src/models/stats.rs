use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个商品的看板统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub sold: u64,
    pub in_stock: i64,
    pub revenue: f64,
}

/// 看板统计 (库存 + 销售)
///
/// `total_items` 为当前库存加已售数量，重新上传库存后会与真实历史总量产生偏差。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: i64,
    pub total_sold: u64,
    pub total_revenue: f64,
    pub total_in_stock: i64,
    pub by_product: IndexMap<String, ProductStat>,
}

/// 单个商品的销售报表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub quantity: u64,
    pub revenue: f64,
    pub cost: f64,
}

/// 镜像文件销售报表 (不含库存)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub total_sold: u64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub by_product: IndexMap<String, ProductReport>,
}

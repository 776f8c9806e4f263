use futures::try_join;
use sqlx::SqlitePool;

use crate::db::queries;
use crate::mirror::{MirrorEvent, MirrorHandle};
use crate::models::{
    DashboardStats, InventoryItem, MirroredSale, ProductReport, ProductStat, SaleRecord,
    SalesReport,
};

/// 看板统计：合并库存与销售
///
/// 按商品名称汇总，销售中出现的名称在前，其余库存名称随后。
pub fn compute_stats(inventory: &[InventoryItem], sales: &[SaleRecord]) -> DashboardStats {
    let mut stats = DashboardStats::default();

    for sale in sales {
        stats.total_sold += 1;
        stats.total_revenue += sale.price;

        let entry = stats
            .by_product
            .entry(sale.name.clone())
            .or_insert_with(ProductStat::default);
        entry.sold += 1;
        entry.revenue += sale.price;
    }

    // 超大库存数量按饱和加法累计
    for item in inventory {
        stats.total_in_stock = stats.total_in_stock.saturating_add(item.quantity);
        let entry = stats
            .by_product
            .entry(item.name.clone())
            .or_insert_with(ProductStat::default);
        entry.in_stock = entry.in_stock.saturating_add(item.quantity);
    }

    let sold = i64::try_from(stats.total_sold).unwrap_or(i64::MAX);
    stats.total_items = stats.total_in_stock.saturating_add(sold);
    stats
}

/// 镜像报表：只看销售记录，缺失成本按 0 计
pub fn compute_report(sales: &[MirroredSale]) -> SalesReport {
    let mut report = SalesReport::default();

    for sale in sales {
        let cost = sale.cost.unwrap_or(0.0);
        report.total_sold += 1;
        report.total_revenue += sale.price;
        report.total_cost += cost;

        let entry = report
            .by_product
            .entry(sale.name.clone())
            .or_insert_with(ProductReport::default);
        entry.quantity += 1;
        entry.revenue += sale.price;
        entry.cost += cost;
    }

    report.total_profit = report.total_revenue - report.total_cost;
    report
}

/// 看板服务
pub struct DashboardService {
    pool: SqlitePool,
    mirror: MirrorHandle,
}

impl DashboardService {
    pub fn new(pool: SqlitePool, mirror: MirrorHandle) -> Self {
        Self { pool, mirror }
    }

    /// 同时读取库存与销售后汇总
    pub async fn stats(&self) -> Result<DashboardStats, sqlx::Error> {
        let (inventory, sales) = try_join!(
            queries::list_items(&self.pool),
            queries::list_sales(&self.pool)
        )?;
        Ok(compute_stats(&inventory, &sales))
    }

    pub async fn sales(&self) -> Result<Vec<SaleRecord>, sqlx::Error> {
        queries::list_sales(&self.pool).await
    }

    /// 清空销售记录，并通知镜像清空
    pub async fn clear_sales(&self) -> Result<(), sqlx::Error> {
        queries::clear_sales(&self.pool).await?;
        self.mirror.send(MirrorEvent::Clear);
        tracing::info!("Sales data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, quantity: i64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            category: "Uncategorized".to_string(),
            price: 5.0,
            cost: None,
            quantity,
        }
    }

    fn sale(id: i64, item_id: &str, name: &str, price: f64) -> SaleRecord {
        SaleRecord {
            sale_id: id,
            item_id: item_id.to_string(),
            name: name.to_string(),
            price,
            cost: None,
            timestamp: "2024-05-01T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_no_sales_three_items() {
        let inventory = vec![item("a", "Bear", 2), item("b", "Fox", 2), item("c", "Owl", 1)];
        let stats = compute_stats(&inventory, &[]);

        assert_eq!(stats.total_sold, 0);
        assert_eq!(stats.total_in_stock, 5);
        assert_eq!(stats.total_items, 5);
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.by_product.len(), 3);
        assert!(stats.by_product.values().all(|p| p.sold == 0 && p.revenue == 0.0));
        assert_eq!(stats.by_product["Owl"].in_stock, 1);
    }

    #[test]
    fn test_merges_by_name_and_keeps_order() {
        let inventory = vec![item("a", "Bear", 1), item("b", "Bear", 4), item("c", "Fox", 0)];
        let sales = vec![
            sale(1, "c", "Fox", 7.5),
            sale(2, "a", "Bear", 5.0),
            sale(3, "z", "Old Name", 3.0),
        ];
        let stats = compute_stats(&inventory, &sales);

        let names: Vec<&str> = stats.by_product.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Fox", "Bear", "Old Name"]);
        assert_eq!(stats.by_product["Bear"].in_stock, 5);
        assert_eq!(stats.by_product["Bear"].sold, 1);
        assert_eq!(stats.by_product["Old Name"].in_stock, 0);
        assert_eq!(stats.total_revenue, 15.5);
        assert_eq!(stats.total_items, stats.total_in_stock + stats.total_sold as i64);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let inventory = vec![item("a", "A", i64::MAX), item("b", "A", i64::MAX)];
        let sales = vec![sale(1, "a", "A", 1.0)];
        let stats = compute_stats(&inventory, &sales);

        assert_eq!(stats.total_in_stock, i64::MAX);
        assert_eq!(stats.total_items, i64::MAX);
        assert_eq!(stats.by_product["A"].in_stock, i64::MAX);
    }

    #[test]
    fn test_report_profit() {
        let sales = vec![
            MirroredSale {
                item_id: "a".to_string(),
                name: "Bear".to_string(),
                price: 10.0,
                cost: Some(4.0),
                timestamp: "2024-05-01T10:00:00.000Z".to_string(),
            },
            MirroredSale {
                item_id: "a".to_string(),
                name: "Bear".to_string(),
                price: 10.0,
                cost: None,
                timestamp: "2024-05-01T11:00:00.000Z".to_string(),
            },
        ];
        let report = compute_report(&sales);

        assert_eq!(report.total_sold, 2);
        assert_eq!(report.total_revenue, 20.0);
        assert_eq!(report.total_cost, 4.0);
        assert_eq!(report.total_profit, 16.0);
        assert_eq!(report.by_product["Bear"].quantity, 2);
        assert_eq!(report.by_product["Bear"].cost, 4.0);
    }

    #[test]
    fn test_empty_report() {
        let report = compute_report(&[]);
        assert_eq!(report, SalesReport::default());
    }
}

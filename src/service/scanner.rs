use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries;
use crate::mirror::{MirrorEvent, MirrorHandle};
use crate::models::{LabelPayload, MirroredSale, SaleRecord};

/// 扫码结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ScanOutcome {
    Recorded { sale: SaleRecord },
    NotFound { id: String },
    OutOfStock { id: String },
    InvalidPayload,
}

/// 扫码售出服务
pub struct ScanService {
    pool: SqlitePool,
    mirror: MirrorHandle,
}

impl ScanService {
    pub fn new(pool: SqlitePool, mirror: MirrorHandle) -> Self {
        Self { pool, mirror }
    }

    /// 处理一次扫码：查找商品 -> 库存校验 -> 记录销售并扣减库存 -> 通知镜像
    pub async fn scan(&self, decoded_text: &str) -> Result<ScanOutcome, sqlx::Error> {
        let Some(payload) = LabelPayload::decode(decoded_text) else {
            tracing::warn!("Failed to parse QR payload: {:?}", decoded_text);
            return Ok(ScanOutcome::InvalidPayload);
        };

        let Some(item) = queries::get_item(&self.pool, &payload.id).await? else {
            tracing::warn!("Item {} not found in inventory", payload.id);
            return Ok(ScanOutcome::NotFound { id: payload.id });
        };

        if item.quantity <= 0 {
            tracing::warn!("Item {} out of stock", item.id);
            return Ok(ScanOutcome::OutOfStock { id: item.id });
        }

        // 条件扣减，并发扫码不会把库存减到负数
        let Some(sale) = queries::sell_one(&self.pool, &item).await? else {
            tracing::warn!("Item {} sold out before this scan", item.id);
            return Ok(ScanOutcome::OutOfStock { id: item.id });
        };

        tracing::info!(
            "Sale #{} recorded: {} ({}) {:.2}",
            sale.sale_id,
            sale.name,
            sale.item_id,
            sale.price
        );
        self.mirror.send(MirrorEvent::Append(MirroredSale::from(&sale)));

        Ok(ScanOutcome::Recorded { sale })
    }
}

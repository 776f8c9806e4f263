use sqlx::SqlitePool;

use super::row_mapper::RowMapper;
use super::upload;
use crate::db::queries;
use crate::error::Result;
use crate::models::{InventoryItem, InventoryPatch, LabelSheet};

/// 库存服务：上传、查询、部分更新、清空、标签
pub struct InventoryService {
    pool: SqlitePool,
    mapper: RowMapper,
}

impl InventoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            mapper: RowMapper::default(),
        }
    }

    /// 上传表格并替换全部库存，返回导入条数
    ///
    /// 文件无法解析或写入失败时库存保持不变。
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<usize> {
        // 1. 解析文件
        let rows = upload::parse_rows(filename, data)?;

        // 2. 行映射
        let items = self.mapper.map_rows(&rows);
        tracing::info!("Upload {}: {} rows -> {} items", filename, rows.len(), items.len());

        // 3. 替换库存 (单事务)
        queries::replace_items(&self.pool, &items).await?;
        Ok(items.len())
    }

    pub async fn list(&self) -> Result<Vec<InventoryItem>> {
        Ok(queries::list_items(&self.pool).await?)
    }

    /// 部分更新，商品不存在时返回 None
    pub async fn update(&self, id: &str, patch: InventoryPatch) -> Result<Option<InventoryItem>> {
        Ok(queries::update_item(&self.pool, id, patch).await?)
    }

    pub async fn clear(&self) -> Result<()> {
        queries::clear_inventory(&self.pool).await?;
        tracing::info!("Inventory cleared");
        Ok(())
    }

    /// 按分类分组的二维码标签
    pub async fn labels(&self) -> Result<LabelSheet> {
        let items = queries::list_items(&self.pool).await?;
        Ok(LabelSheet::from_items(&items))
    }
}

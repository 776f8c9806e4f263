use crate::models::{InventoryItem, InventoryPatch, NewSale, SaleRecord};
use sqlx::{SqliteConnection, SqlitePool};

/// 每批插入的行数 (SQLite 绑定参数上限)
const PUT_CHUNK: usize = 1000;

/// 用新数据整体替换库存 (同一事务，失败时保留原库存)
pub async fn replace_items(pool: &SqlitePool, items: &[InventoryItem]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM inventory").execute(&mut *tx).await?;
    insert_items(&mut *tx, items).await?;
    tx.commit().await?;

    tracing::debug!("替换库存为 {} 条", items.len());
    Ok(())
}

/// 分批 INSERT OR REPLACE
async fn insert_items(conn: &mut SqliteConnection, items: &[InventoryItem]) -> Result<(), sqlx::Error> {
    for chunk in items.chunks(PUT_CHUNK) {
        let mut query_builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "INSERT OR REPLACE INTO inventory (id, name, category, price, cost, quantity) ",
        );
        query_builder.push_values(chunk, |mut b, item| {
            b.push_bind(&item.id)
                .push_bind(&item.name)
                .push_bind(&item.category)
                .push_bind(item.price)
                .push_bind(item.cost)
                .push_bind(item.quantity);
        });
        query_builder.build().execute(&mut *conn).await?;
    }
    Ok(())
}

/// 查询单个库存商品
pub async fn get_item(pool: &SqlitePool, id: &str) -> Result<Option<InventoryItem>, sqlx::Error> {
    sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT id, name, category, price, cost, quantity
        FROM inventory
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// 查询全部库存 (按 id 排序)
pub async fn list_items(pool: &SqlitePool) -> Result<Vec<InventoryItem>, sqlx::Error> {
    sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT id, name, category, price, cost, quantity
        FROM inventory
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// 合并部分字段后整条写回，商品不存在时返回 None
pub async fn update_item(
    pool: &SqlitePool,
    id: &str,
    patch: InventoryPatch,
) -> Result<Option<InventoryItem>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let current = sqlx::query_as::<_, InventoryItem>(
        "SELECT id, name, category, price, cost, quantity FROM inventory WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(mut item) = current else {
        tx.rollback().await?;
        return Ok(None);
    };
    item.apply(patch);

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO inventory (id, name, category, price, cost, quantity)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.id)
    .bind(&item.name)
    .bind(&item.category)
    .bind(item.price)
    .bind(item.cost)
    .bind(item.quantity)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Some(item))
}

/// 清空库存
pub async fn clear_inventory(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM inventory").execute(pool).await?;
    Ok(())
}

/// 扣减一件库存并记录销售 (同一事务)
///
/// 库存已为 0 时不扣减、不记录，返回 None。
pub async fn sell_one(
    pool: &SqlitePool,
    item: &InventoryItem,
) -> Result<Option<SaleRecord>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE inventory SET quantity = quantity - 1 WHERE id = ? AND quantity > 0")
        .bind(&item.id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let sale = NewSale::for_item(item);
    let inserted = sqlx::query(
        r#"
        INSERT INTO sales (item_id, name, price, cost, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&sale.item_id)
    .bind(&sale.name)
    .bind(sale.price)
    .bind(sale.cost)
    .bind(&sale.timestamp)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Some(sale.with_id(inserted.last_insert_rowid())))
}

/// 查询全部销售记录 (按 sale_id 升序)
pub async fn list_sales(pool: &SqlitePool) -> Result<Vec<SaleRecord>, sqlx::Error> {
    sqlx::query_as::<_, SaleRecord>(
        r#"
        SELECT sale_id, item_id, name, price, cost, timestamp
        FROM sales
        ORDER BY sale_id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// 清空销售记录
pub async fn clear_sales(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sales").execute(pool).await?;
    Ok(())
}

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::config::StoreConfig;

/// 存储名称与结构版本
pub const STORE_NAME: &str = "plushie-db";
pub const STORE_VERSION: i64 = 1;

/// 本地持久化存储句柄，启动时打开一次并注入各服务
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// 打开存储，必要时创建文件并升级结构
    pub async fn open(config: &StoreConfig) -> Result<Self, sqlx::Error> {
        let pool = create_pool(&config.url, config.max_connections).await?;
        upgrade(&pool).await?;
        tracing::info!("Store {} v{} opened at {}", STORE_NAME, STORE_VERSION, config.url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 关闭连接池，等待所有连接归还
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Store {} closed", STORE_NAME);
    }
}

/// 创建数据库连接池
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    ensure_parent_dir(database_url).await?;

    let mut connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // 设置慢查询日志阈值为 5秒
    connect_options = connect_options.log_slow_statements(
        tracing::log::LevelFilter::Warn,
        Duration::from_secs(5),
    );

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options)
        .await
}

/// SQLite 不会自动创建目录
async fn ensure_parent_dir(database_url: &str) -> Result<(), sqlx::Error> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// 按 user_version 升级表结构
async fn upgrade(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    if version >= STORE_VERSION {
        return Ok(());
    }

    tracing::info!("Upgrading store {} from v{} to v{}", STORE_NAME, version, STORE_VERSION);
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            id       TEXT PRIMARY KEY NOT NULL,
            name     TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'Uncategorized',
            price    REAL NOT NULL,
            cost     REAL,
            quantity INTEGER NOT NULL
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // AUTOINCREMENT: 清空后 sale_id 不复用
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            sale_id   INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id   TEXT NOT NULL,
            name      TEXT NOT NULL,
            price     REAL NOT NULL,
            cost      REAL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(&format!("PRAGMA user_version = {}", STORE_VERSION))
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}

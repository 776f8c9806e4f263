use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::MirrorError;
use crate::models::MirroredSale;

/// 服务端销售镜像 (JSON 数组文件)
#[derive(Debug)]
pub struct SalesMirror {
    path: PathBuf,
    // 进程内串行化读改写
    lock: Mutex<()>,
}

impl SalesMirror {
    /// 打开镜像文件，不存在时创建目录并写入 `[]`
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, MirrorError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        if tokio::fs::metadata(&path).await.is_err() {
            write_sales(&path, &[]).await?;
            tracing::info!("Created sales mirror at {}", path.display());
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部镜像记录，文件缺失或格式错误时返回错误
    pub async fn read_all(&self) -> Result<Vec<MirroredSale>, MirrorError> {
        let _guard = self.lock.lock().await;
        read_sales(&self.path).await
    }

    /// 追加一条记录；已有内容无法读取时从空数组重新开始
    pub async fn append(&self, sale: MirroredSale) -> Result<(), MirrorError> {
        let _guard = self.lock.lock().await;
        let mut sales = match read_sales(&self.path).await {
            Ok(sales) => sales,
            Err(e) => {
                tracing::warn!("Sales mirror unreadable, starting fresh: {}", e);
                Vec::new()
            }
        };
        sales.push(sale);
        write_sales(&self.path, &sales).await
    }

    /// 清空为 `[]`
    pub async fn clear(&self) -> Result<(), MirrorError> {
        let _guard = self.lock.lock().await;
        write_sales(&self.path, &[]).await
    }
}

async fn read_sales(path: &Path) -> Result<Vec<MirroredSale>, MirrorError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

async fn write_sales(path: &Path, sales: &[MirroredSale]) -> Result<(), MirrorError> {
    let body = serde_json::to_string_pretty(sales)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

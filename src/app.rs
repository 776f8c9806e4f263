use axum::Router;
use std::sync::Arc;

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::db::Store;
use crate::error::Result;
use crate::mirror::{MirrorForwarder, MirrorHandle, SalesMirror};
use crate::service::{DashboardService, InventoryService, ScanService};

/// 应用装配：存储、镜像转发任务与各服务
pub struct App {
    state: AppState,
    store: Store,
    mirror: MirrorHandle,
    forwarder: MirrorForwarder,
}

impl App {
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let store = Store::open(&config.store).await?;

        let sales_mirror = Arc::new(SalesMirror::open(&config.mirror.path).await?);
        let (mirror, forwarder) = MirrorForwarder::spawn(sales_mirror.clone());

        let pool = store.pool().clone();
        let state = AppState {
            inventory: Arc::new(InventoryService::new(pool.clone())),
            scanner: Arc::new(ScanService::new(pool.clone(), mirror.clone())),
            dashboard: Arc::new(DashboardService::new(pool, mirror.clone())),
            mirror: sales_mirror,
        };

        Ok(Self {
            state,
            store,
            mirror,
            forwarder,
        })
    }

    pub fn router(&self) -> Router {
        api::router(self.state.clone())
    }

    pub fn mirror(&self) -> &MirrorHandle {
        &self.mirror
    }

    /// 停止服务：等待镜像事件写完后关闭存储
    ///
    /// 调用前需丢弃 router() 返回的所有路由。
    pub async fn shutdown(self) {
        let Self {
            state,
            store,
            mirror,
            forwarder,
        } = self;
        drop(state);
        drop(mirror);
        forwarder.shutdown().await;
        store.close().await;
    }
}

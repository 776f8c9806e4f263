use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

use super::handlers;
use crate::mirror::SalesMirror;
use crate::service::{DashboardService, InventoryService, ScanService};

/// 上传文件大小上限
const UPLOAD_LIMIT: usize = 16 * 1024 * 1024;

/// 共享状态：各路由组使用的服务
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<InventoryService>,
    pub scanner: Arc<ScanService>,
    pub dashboard: Arc<DashboardService>,
    pub mirror: Arc<SalesMirror>,
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    // 库存与标签
    let inventory_routes = Router::new()
        .route(
            "/api/inventory/upload",
            post(handlers::upload_inventory).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route("/api/inventory", get(handlers::list_inventory))
        .route("/api/inventory/clear", post(handlers::clear_inventory))
        .route("/api/inventory/:id", patch(handlers::update_inventory_item))
        .route("/api/labels", get(handlers::label_sheet))
        .with_state(state.inventory);

    // 扫码售出
    let scan_routes = Router::new()
        .route("/api/scan", post(handlers::scan))
        .with_state(state.scanner);

    // 看板
    let dashboard_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/sales", get(handlers::list_sales))
        .route("/api/sales/clear", post(handlers::clear_sales))
        .with_state(state.dashboard);

    // 服务端镜像文件
    let mirror_routes = Router::new()
        .route("/api/stats", get(handlers::mirror_stats))
        .route("/api/record-sale", post(handlers::record_sale))
        .route("/api/clear-data", post(handlers::clear_data))
        .with_state(state.mirror);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(inventory_routes)
        .merge(scan_routes)
        .merge(dashboard_routes)
        .merge(mirror_routes)
        .layer(ServiceBuilder::new())
}

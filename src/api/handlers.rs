use crate::error::{AppError, Result};
use crate::mirror::SalesMirror;
use crate::models::{
    DashboardStats, InventoryItem, InventoryPatch, LabelSheet, MirroredSale, SaleRecord,
    SalesReport,
};
use crate::service::{compute_report, DashboardService, InventoryService, ScanOutcome, ScanService};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 上传参数: 原始文件名 (用于判断格式)
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub filename: String,
}

/// 上传响应
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

/// 扫码请求: 二维码解码后的文本
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub payload: String,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}

/// JSON 请求体解析失败统一返回 400
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 上传库存表格 (CSV / Excel)，替换现有库存
pub async fn upload_inventory(
    State(service): State<Arc<InventoryService>>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Response {
    match service.upload(&params.filename, &body).await {
        Ok(count) => {
            let response = UploadResponse {
                success: true,
                message: format!("Successfully uploaded {} items.", count),
                count,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let status = match e {
                AppError::Upload(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::warn!("Upload {} failed: {}", params.filename, e);
            let response = UploadResponse {
                success: false,
                message: format!("Failed to parse file: {}", e),
                count: 0,
            };
            (status, Json(response)).into_response()
        }
    }
}

pub async fn list_inventory(
    State(service): State<Arc<InventoryService>>,
) -> Result<Json<Vec<InventoryItem>>> {
    Ok(Json(service.list().await?))
}

/// 部分更新单个商品
pub async fn update_inventory_item(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<InventoryPatch>, JsonRejection>,
) -> Result<Json<InventoryItem>> {
    let patch = json_body(payload)?;
    match service.update(&id, patch).await? {
        Some(item) => Ok(Json(item)),
        None => Err(AppError::NotFound(id)),
    }
}

pub async fn clear_inventory(
    State(service): State<Arc<InventoryService>>,
) -> Result<Json<OkResponse>> {
    service.clear().await?;
    Ok(OkResponse::ok())
}

/// 打印用二维码标签
pub async fn label_sheet(State(service): State<Arc<InventoryService>>) -> Result<Json<LabelSheet>> {
    Ok(Json(service.labels().await?))
}

/// 扫码售出
pub async fn scan(
    State(service): State<Arc<ScanService>>,
    payload: std::result::Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanOutcome>> {
    let req = json_body(payload)?;
    Ok(Json(service.scan(&req.payload).await?))
}

/// 看板统计 (库存 + 销售)
pub async fn dashboard(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<DashboardStats>> {
    Ok(Json(service.stats().await?))
}

pub async fn list_sales(State(service): State<Arc<DashboardService>>) -> Result<Json<Vec<SaleRecord>>> {
    Ok(Json(service.sales().await?))
}

pub async fn clear_sales(State(service): State<Arc<DashboardService>>) -> Result<Json<OkResponse>> {
    service.clear_sales().await?;
    Ok(OkResponse::ok())
}

/// 镜像文件销售报表
pub async fn mirror_stats(State(mirror): State<Arc<SalesMirror>>) -> Result<Json<SalesReport>> {
    let sales = mirror.read_all().await?;
    Ok(Json(compute_report(&sales)))
}

/// 追加一条销售到镜像文件
pub async fn record_sale(
    State(mirror): State<Arc<SalesMirror>>,
    payload: std::result::Result<Json<MirroredSale>, JsonRejection>,
) -> Result<Json<OkResponse>> {
    let sale = json_body(payload)?;
    mirror.append(sale).await?;
    Ok(OkResponse::ok())
}

/// 清空镜像文件
pub async fn clear_data(State(mirror): State<Arc<SalesMirror>>) -> Result<Json<OkResponse>> {
    mirror.clear().await?;
    Ok(OkResponse::ok())
}

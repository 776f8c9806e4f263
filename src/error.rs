use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

/// 上传文件解析错误
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet parse error: {0}")]
    Workbook(String),
}

impl From<calamine::Error> for UploadError {
    fn from(err: calamine::Error) -> Self {
        UploadError::Workbook(err.to_string())
    }
}

/// 镜像文件读写错误
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Mirror I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mirror data error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 统一的服务错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Invalid body: {0}")]
    InvalidBody(String),

    #[error("Item not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidBody(_) | AppError::Upload(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Store(e) => {
                tracing::error!("store failure: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Store error".to_string())
            }
            AppError::Mirror(e) => {
                tracing::error!("mirror failure: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to access sales data".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

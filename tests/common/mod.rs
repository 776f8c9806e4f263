use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use plushie_pos::config::{MirrorConfig, ServerConfig, StoreConfig};
use plushie_pos::{App, AppConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestApp {
    pub app: App,
    pub router: Router,
    pub mirror_path: PathBuf,
    pub dir: TempDir,
}

/// 每个测试使用独立的临时目录
pub async fn create_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mirror_path = dir.path().join("data").join("sales.json");
    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        store: StoreConfig {
            url: format!("sqlite://{}", dir.path().join("plushie-db.sqlite").display()),
            max_connections: 2,
        },
        mirror: MirrorConfig {
            path: mirror_path.to_string_lossy().into_owned(),
        },
    };

    let app = App::open(&config).await.unwrap();
    let router = app.router();
    TestApp {
        app,
        router,
        mirror_path,
        dir,
    }
}

/// Helper to make JSON requests
pub async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(serde_json::to_string(&json).unwrap()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    send(app, request).await
}

/// Upload raw file bytes
pub async fn upload(app: &Router, filename: &str, data: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/inventory/upload?filename={}", filename))
        .header("content-type", "application/octet-stream")
        .body(Body::from(data.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
        })
    };

    (status, body)
}

/// 镜像由后台任务写入，轮询直到条数符合预期
pub async fn wait_for_mirror(app: &Router, expected_sold: u64) -> Value {
    let mut last = json!({});
    for _ in 0..100 {
        let (status, body) = json_request(app, "GET", "/api/stats", None).await;
        if status == StatusCode::OK && body["totalSold"] == json!(expected_sold) {
            return body;
        }
        last = body;
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("mirror never reached {} sales, last report: {}", expected_sold, last);
}

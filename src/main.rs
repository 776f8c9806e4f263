use plushie_pos::{App, AppConfig};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 打开存储与镜像
    let app = App::open(&config).await?;
    let router = app.router();

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST  /api/inventory/upload?filename=  - upload CSV/Excel inventory");
    info!("  GET   /api/inventory                   - list inventory");
    info!("  PATCH /api/inventory/:id               - update item");
    info!("  POST  /api/inventory/clear             - clear inventory");
    info!("  GET   /api/labels                      - QR label sheet");
    info!("  POST  /api/scan                        - record sale from QR payload");
    info!("  GET   /api/dashboard                   - inventory + sales stats");
    info!("  GET   /api/sales                       - list sales");
    info!("  POST  /api/sales/clear                 - clear sales");
    info!("  GET   /api/stats                       - sales mirror report");
    info!("  POST  /api/record-sale                 - append to sales mirror");
    info!("  POST  /api/clear-data                  - clear sales mirror");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    app.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

use camlink_api::{AppState, build_router};
use camlink_cloud::{Credentials, HttpGateway};
use camlink_config::AppConfig;
use camlink_telemetry::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let credentials = Credentials::new(config.access_id.clone(), config.access_secret.clone());
    let gateway = Arc::new(HttpGateway::connect(credentials, &config.base_url)?);
    let state = AppState::new(gateway, config.device_ids.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(
        target: "camlink.api",
        addr = %config.http_addr,
        base_url = %config.base_url,
        configured_devices = config.device_ids.len(),
        "server_listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

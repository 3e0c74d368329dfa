//! 摄像头 HTTP 门面：把设备云的发现、直播流、控制与录像能力以 `/api/*` 暴露给展示层。

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use camlink_cloud::HttpGateway;
use camlink_control::CommandDispatcher;
use camlink_discovery::DeviceDiscovery;
use camlink_playback::RecordingCatalog;
use camlink_stream::StreamResolver;
use std::sync::Arc;

pub use routes::{build_router, create_api_router};

/// 各 handler 共享的服务集合，底层共用同一个网关（同一份 token）。
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<DeviceDiscovery>,
    pub streams: Arc<StreamResolver>,
    pub commands: Arc<CommandDispatcher>,
    pub recordings: Arc<RecordingCatalog>,
}

impl AppState {
    pub fn new(gateway: Arc<HttpGateway>, device_ids: Vec<String>) -> Self {
        Self {
            discovery: Arc::new(DeviceDiscovery::new(gateway.clone(), device_ids)),
            streams: Arc::new(StreamResolver::new(gateway.clone())),
            commands: Arc::new(CommandDispatcher::new(gateway.clone())),
            recordings: Arc::new(RecordingCatalog::new(gateway)),
        }
    }
}

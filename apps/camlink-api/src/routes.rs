//! 路由定义
//!
//! 所有接口挂在 `/api` 前缀下：
//! - 健康检查：/api/health
//! - 摄像头：/api/cameras、/api/cameras/:device_id/{stream,status,ptz,command}
//! - 录像：/api/cameras/:device_id/recordings[/dates]
//! - 调试：/api/devices、/api/metrics

use crate::AppState;
use crate::handlers::*;
use crate::middleware::request_context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// 创建 `/api` 下的子路由。
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/cameras", get(list_cameras))
        .route("/cameras/:device_id/stream", get(get_stream))
        .route("/cameras/:device_id/status", get(get_status))
        .route("/cameras/:device_id/ptz", post(control_ptz))
        .route("/cameras/:device_id/command", post(send_command))
        .route("/cameras/:device_id/recordings/dates", get(list_recording_dates))
        .route("/cameras/:device_id/recordings", get(list_recordings))
        .route("/devices", get(list_devices))
        .route("/metrics", get(get_metrics))
}

/// 完整应用：路由 + 请求上下文 + HTTP trace。
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_api_router())
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(middleware::from_fn(request_context))
        .layer(TraceLayer::new_for_http())
}

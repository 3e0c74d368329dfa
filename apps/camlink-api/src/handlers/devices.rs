use crate::AppState;
use crate::utils::response::cloud_error;
use api_contract::DevicesResponse;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

/// 原始设备列表（调试用，不做摄像头过滤）。
pub async fn list_devices(State(state): State<AppState>) -> Response {
    match state.discovery.list_devices().await {
        Ok(devices) => Json(DevicesResponse { devices }).into_response(),
        Err(err) => cloud_error("Failed to fetch devices", err),
    }
}

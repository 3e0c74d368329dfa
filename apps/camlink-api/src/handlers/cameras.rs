//! 摄像头 handlers
//!
//! - GET /api/cameras?includeStreams=true - 摄像头列表（可选附带在线设备的直播地址）
//! - GET /api/cameras/:device_id/stream - 分配直播地址（HLS 优先，RTSP 兜底）
//! - GET /api/cameras/:device_id/status - 设备原始状态
//! - POST /api/cameras/:device_id/ptz - 云台转动
//! - POST /api/cameras/:device_id/command - 通用命令

use crate::AppState;
use crate::utils::response::{cloud_error, internal_error, not_found_error};
use crate::utils::{parse_direction, require_non_blank, validate_device_id};
use api_contract::{
    CamerasQuery, CamerasResponse, CommandRequest, PtzRequest, StatusResponse,
    StreamUrlResponse, SuccessResponse,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use camlink_discovery::resolve_cameras;
use domain::Camera;
use futures::future::join_all;
use tracing::warn;

/// 摄像头列表
///
/// 每次请求都重新发现设备；`includeStreams=true` 时并发为在线摄像头分配直播地址，
/// 单个摄像头分配失败只会缺少 `streamUrl`，不影响整体响应。
pub async fn list_cameras(
    State(state): State<AppState>,
    Query(query): Query<CamerasQuery>,
) -> Response {
    let records = match state.discovery.list_devices().await {
        Ok(records) => records,
        Err(err) => return cloud_error("Failed to fetch cameras", err),
    };
    let mut cameras = resolve_cameras(&records);
    if query.wants_streams() {
        cameras = join_all(cameras.into_iter().map(|camera| attach_stream(&state, camera))).await;
    }
    Json(CamerasResponse { cameras }).into_response()
}

async fn attach_stream(state: &AppState, mut camera: Camera) -> Camera {
    if !camera.is_online {
        return camera;
    }
    match state.streams.allocate_url(&camera.id).await {
        Ok(url) => camera.stream_url = url,
        Err(err) => {
            warn!(target: "camlink.api", camera_id = %camera.id, error = %err, "camera_stream_skipped");
        }
    }
    camera
}

/// 分配直播地址
pub async fn get_stream(State(state): State<AppState>, Path(device_id): Path<String>) -> Response {
    let device_id = match validate_device_id(&device_id) {
        Ok(device_id) => device_id,
        Err(response) => return response,
    };
    match state.streams.allocate_url(device_id).await {
        Ok(Some(stream_url)) => Json(StreamUrlResponse { stream_url }).into_response(),
        Ok(None) => not_found_error("Stream not available"),
        Err(err) => cloud_error("Failed to get stream URL", err),
    }
}

/// 设备原始状态
pub async fn get_status(State(state): State<AppState>, Path(device_id): Path<String>) -> Response {
    let device_id = match validate_device_id(&device_id) {
        Ok(device_id) => device_id,
        Err(response) => return response,
    };
    match state.discovery.device_status(device_id).await {
        Ok(status) => Json(StatusResponse { status }).into_response(),
        Err(err) => cloud_error("Failed to get device status", err),
    }
}

/// 云台转动
///
/// 方向非法时直接返回 400，不会发出任何云端请求。
pub async fn control_ptz(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    payload: Option<Json<PtzRequest>>,
) -> Response {
    let device_id = match validate_device_id(&device_id) {
        Ok(device_id) => device_id,
        Err(response) => return response,
    };
    let Json(req) = payload.unwrap_or_default();
    let direction = match parse_direction(req.direction.as_deref()) {
        Ok(direction) => direction,
        Err(response) => return response,
    };
    match state.commands.ptz(device_id, direction).await {
        Ok(true) => Json(SuccessResponse { success: true }).into_response(),
        Ok(false) => internal_error("Failed to control PTZ"),
        Err(err) => cloud_error("Failed to control PTZ", err),
    }
}

/// 通用命令
pub async fn send_command(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    payload: Option<Json<CommandRequest>>,
) -> Response {
    let device_id = match validate_device_id(&device_id) {
        Ok(device_id) => device_id,
        Err(response) => return response,
    };
    let Json(req) = payload.unwrap_or_default();
    let code = match require_non_blank(req.code, "Command code is required") {
        Ok(code) => code,
        Err(response) => return response,
    };
    match state.commands.command(device_id, &code, req.value).await {
        Ok(true) => Json(SuccessResponse { success: true }).into_response(),
        Ok(false) => internal_error("Failed to send command"),
        Err(err) => cloud_error("Failed to send command", err),
    }
}

//! 稳定的 DTO 与 API 响应契约。
//!
//! 成功响应直接返回业务对象；失败响应统一为 `{ "error": message }`。

use domain::{Camera, DeviceRecord};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 失败响应体。
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// 健康检查。
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// `GET /api/cameras` 查询参数；只有字面量 `true` 才开启流地址解析。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamerasQuery {
    #[serde(default)]
    pub include_streams: Option<String>,
}

impl CamerasQuery {
    pub fn wants_streams(&self) -> bool {
        self.include_streams.as_deref() == Some("true")
    }
}

#[derive(Debug, Serialize)]
pub struct CamerasResponse {
    pub cameras: Vec<Camera>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamUrlResponse {
    pub stream_url: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: Value,
}

/// 云台请求体；方向在 handler 中校验。
#[derive(Debug, Default, Deserialize)]
pub struct PtzRequest {
    #[serde(default)]
    pub direction: Option<String>,
}

/// 通用命令请求体。
///
/// `value` 缺省为 `None`；显式的 `null` 为 `Some(Value::Null)`，原样下发。
#[derive(Debug, Default, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub value: Option<Value>,
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct RecordingDatesResponse {
    pub dates: Vec<String>,
}

/// 录像查询参数（unix 秒），在 handler 中解析。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingQuery {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordingEventsResponse {
    pub events: Vec<Value>,
}

/// 原始设备列表（调试用）。
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<DeviceRecord>,
}

/// 指标快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub cloud_requests: u64,
    pub cloud_failures: u64,
    pub token_refreshes: u64,
    pub token_refresh_failures: u64,
    pub discovery_auto: u64,
    pub discovery_fallback: u64,
    pub fallback_lookup_failures: u64,
    pub stream_hls: u64,
    pub stream_rtsp: u64,
    pub stream_unavailable: u64,
    pub commands_sent: u64,
    pub command_failures: u64,
}

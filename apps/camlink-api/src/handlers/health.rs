use api_contract::HealthResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};

/// 存活检查，不访问云端。
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

//! HTTP 错误响应辅助函数
//!
//! 所有错误体统一为 `{ "error": message }`：
//! - bad_request_error：400，输入校验失败
//! - not_found_error：404，资源不可用
//! - cloud_error：500，云端调用失败（原始错误只写日志）

use api_contract::ErrorBody;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use camlink_cloud::CloudError;
use tracing::error;

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
}

/// 资源未找到错误响应
pub fn not_found_error(message: impl Into<String>) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new(message))).into_response()
}

/// 内部错误响应（不含云端错误细节）
pub fn internal_error(message: impl Into<String>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(message))).into_response()
}

/// 云端调用失败
pub fn cloud_error(message: &str, err: CloudError) -> Response {
    error!(target: "camlink.api", error = %err, remote = err.is_remote(), "{message}");
    internal_error(message)
}

//! 输入验证辅助函数
//!
//! 失败时直接返回 400 响应，handler 用 `match ... Err(response) => return response` 提前退出。

use crate::utils::response::bad_request_error;
use axum::response::Response;
use domain::PtzDirection;

/// 设备 ID 会拼进签名路径，只允许字母、数字、`-`、`_`。
pub fn validate_device_id(device_id: &str) -> Result<&str, Response> {
    let valid = !device_id.is_empty()
        && device_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid {
        return Err(bad_request_error("Invalid device id"));
    }
    Ok(device_id)
}

/// 验证必填字段非空白；通过时原样返回，不做 trim。
pub fn require_non_blank(value: Option<String>, message: &str) -> Result<String, Response> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(bad_request_error(message)),
    }
}

/// 云台方向只接受 up/down/left/right。
pub fn parse_direction(value: Option<&str>) -> Result<PtzDirection, Response> {
    value
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| bad_request_error("Invalid direction"))
}

/// 录像时间窗口（unix 秒），两个参数都必须提供。
pub fn parse_time_window(
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(i64, i64), Response> {
    let (Some(start_time), Some(end_time)) = (
        start_time.filter(|value| !value.trim().is_empty()),
        end_time.filter(|value| !value.trim().is_empty()),
    ) else {
        return Err(bad_request_error("startTime and endTime are required"));
    };
    match (start_time.trim().parse(), end_time.trim().parse()) {
        (Ok(start), Ok(end)) => Ok((start, end)),
        _ => Err(bad_request_error("startTime and endTime must be unix seconds")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_rejects_query_characters() {
        assert!(validate_device_id("bf1234abcd_x-1").is_ok());
        assert!(validate_device_id("abc?x=1").is_err());
        assert!(validate_device_id("abc/def").is_err());
        assert!(validate_device_id("").is_err());
    }

    #[test]
    fn direction_is_case_sensitive() {
        assert_eq!(parse_direction(Some("left")).ok(), Some(PtzDirection::Left));
        assert!(parse_direction(Some("LEFT")).is_err());
        assert!(parse_direction(Some("diagonal")).is_err());
        assert!(parse_direction(None).is_err());
    }

    #[test]
    fn required_value_is_kept_verbatim() {
        assert_eq!(
            require_non_blank(Some(" basic_flip ".to_string()), "code").ok(),
            Some(" basic_flip ".to_string())
        );
        assert!(require_non_blank(Some("  ".to_string()), "code").is_err());
        assert!(require_non_blank(None, "code").is_err());
    }

    #[test]
    fn time_window_requires_both_numbers() {
        assert_eq!(parse_time_window(Some("10"), Some("20")).ok(), Some((10, 20)));
        assert!(parse_time_window(Some("10"), None).is_err());
        assert!(parse_time_window(Some("ten"), Some("20")).is_err());
    }
}

//! 应用运行配置加载。

use std::env;

/// 未配置 `TUYA_BASE_URL` 时使用的云端区域地址（欧洲区）。
pub const DEFAULT_BASE_URL: &str = "https://openapi.tuyaeu.com";

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub access_id: String,
    pub access_secret: String,
    pub base_url: String,
    /// 自动发现不可用时逐个查询的设备 ID 列表。
    pub device_ids: Vec<String>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_id = read_required("TUYA_ACCESS_ID")?;
        let access_secret = read_required("TUYA_ACCESS_SECRET")?;
        let base_url = read_optional("TUYA_BASE_URL")
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid("TUYA_BASE_URL".to_string(), base_url));
        }
        let device_ids = read_optional("TUYA_DEVICE_IDS")
            .map(|value| parse_device_ids(&value))
            .unwrap_or_default();
        let http_addr =
            env::var("CAMLINK_HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        Ok(Self {
            http_addr,
            access_id,
            access_secret,
            base_url,
            device_ids,
        })
    }
}

/// 解析逗号分隔的设备 ID，去除空白并丢弃空项。
pub fn parse_device_ids(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// 读取必填环境变量，空字符串视同缺失。
fn read_required(key: &str) -> Result<String, ConfigError> {
    read_optional(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

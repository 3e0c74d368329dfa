use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 云端返回的原始设备记录。
///
/// 只显式声明业务需要的字段，其余字段原样保留在 `extra` 中，
/// 调试接口可以把记录完整地回传给调用方。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    /// 最近更新时间（unix 秒）。
    #[serde(default)]
    pub update_time: Option<i64>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceRecord {
    /// 构造只含必要字段的记录（其余字段为空）。
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: category.into(),
            online: false,
            product_id: None,
            product_name: None,
            update_time: None,
            uuid: None,
            extra: Map::new(),
        }
    }
}

/// 摄像头领域实体：每次发现时从 DeviceRecord 重新推导，不单独持久化。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub device_id: String,
    pub is_online: bool,
    #[serde(rename = "supportsPTZ")]
    pub supports_ptz: bool,
    pub category: String,
    /// ISO-8601（UTC）格式的最近在线时间。
    pub last_seen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

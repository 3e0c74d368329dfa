use chrono::{DateTime, SecondsFormat, Utc};
use domain::{Camera, DeviceRecord};

/// 摄像头类设备分类：智能摄像头、IP 摄像头、门铃、通用摄像头。
pub const CAMERA_CATEGORIES: [&str; 4] = ["sp", "ipc", "dghd", "camera"];

/// 支持云台的分类。
pub const PTZ_CATEGORIES: [&str; 2] = ["sp", "ipc"];

/// 名称与产品名都为空时的显示名。
pub const UNNAMED_CAMERA: &str = "Camera";

pub fn is_camera_category(category: &str) -> bool {
    CAMERA_CATEGORIES.contains(&category)
}

/// 过滤出摄像头类记录并映射为 Camera，保持输入顺序。
pub fn resolve_cameras(records: &[DeviceRecord]) -> Vec<Camera> {
    records
        .iter()
        .filter(|record| is_camera_category(&record.category))
        .map(to_camera)
        .collect()
}

fn to_camera(record: &DeviceRecord) -> Camera {
    let name = [record.name.as_deref(), record.product_name.as_deref()]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or(UNNAMED_CAMERA)
        .to_string();
    let device_id = record
        .uuid
        .as_deref()
        .filter(|uuid| !uuid.is_empty())
        .unwrap_or(record.id.as_str())
        .to_string();

    Camera {
        id: record.id.clone(),
        name,
        device_id,
        is_online: record.online,
        supports_ptz: PTZ_CATEGORIES.contains(&record.category.as_str()),
        category: record.category.clone(),
        last_seen: iso_from_unix_seconds(record.update_time.unwrap_or_default()),
        stream_url: None,
    }
}

/// unix 秒 → ISO-8601（UTC，毫秒精度）；超出范围时回落到 epoch。
fn iso_from_unix_seconds(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

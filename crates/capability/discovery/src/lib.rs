//! 设备发现与摄像头映射。
//!
//! - [`DeviceDiscovery`]：按策略顺序解析设备列表（自动发现 → 配置列表）
//! - [`resolve_cameras`]：纯函数，把原始设备记录过滤并映射为 [`domain::Camera`]

mod camera;
mod discovery;

pub use camera::{
    CAMERA_CATEGORIES, PTZ_CATEGORIES, UNNAMED_CAMERA, is_camera_category, resolve_cameras,
};
pub use discovery::{DeviceDiscovery, DiscoveryStrategy};

use serde::Serialize;

/// 直播流协议。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamProtocol {
    Hls,
    Rtsp,
}

impl StreamProtocol {
    /// 云端分配接口中 `type` 字段的取值。
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hls => "hls",
            Self::Rtsp => "rtsp",
        }
    }
}

/// 一次流分配的结果（有时效，不缓存）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamAllocation {
    pub protocol: StreamProtocol,
    pub url: String,
}

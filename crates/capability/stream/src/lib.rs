//! 直播流分配：按 HLS → RTSP 顺序尝试，返回第一个可用地址。
//!
//! 分配结果不缓存，每次调用都向云端重新申请。

use camlink_cloud::{CloudError, HttpGateway, Method};
use camlink_telemetry::{record_stream_hls, record_stream_rtsp, record_stream_unavailable};
use domain::{StreamAllocation, StreamProtocol};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// 协议尝试顺序。
pub const PROTOCOL_ORDER: [StreamProtocol; 2] = [StreamProtocol::Hls, StreamProtocol::Rtsp];

#[derive(Deserialize)]
struct AllocatedStream {
    #[serde(default)]
    url: Option<String>,
}

pub struct StreamResolver {
    gateway: Arc<HttpGateway>,
}

impl StreamResolver {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    /// 分配直播流。
    ///
    /// 单个协议的失败（传输、远端拒绝、解析失败、空地址）只会切换到下一个协议；
    /// 全部失败返回 `Ok(None)`。只有拿不到 access token 时返回 Err。
    pub async fn allocate(&self, device_id: &str) -> Result<Option<StreamAllocation>, CloudError> {
        self.gateway.tokens().ensure_valid().await?;

        for protocol in PROTOCOL_ORDER {
            match self.attempt(device_id, protocol).await {
                Ok(url) => {
                    match protocol {
                        StreamProtocol::Hls => record_stream_hls(),
                        StreamProtocol::Rtsp => record_stream_rtsp(),
                    }
                    info!(
                        target: "camlink.stream",
                        device_id = %device_id,
                        protocol = protocol.as_str(),
                        "stream_allocated"
                    );
                    return Ok(Some(StreamAllocation { protocol, url }));
                }
                Err(err) => {
                    warn!(
                        target: "camlink.stream",
                        device_id = %device_id,
                        protocol = protocol.as_str(),
                        error = %err,
                        "stream_allocation_failed"
                    );
                }
            }
        }

        record_stream_unavailable();
        Ok(None)
    }

    /// 只取地址。
    pub async fn allocate_url(&self, device_id: &str) -> Result<Option<String>, CloudError> {
        Ok(self.allocate(device_id).await?.map(|allocation| allocation.url))
    }

    async fn attempt(&self, device_id: &str, protocol: StreamProtocol) -> Result<String, CloudError> {
        let path = format!("/v1.0/devices/{device_id}/stream/actions/allocate");
        let body = json!({ "type": protocol.as_str() });
        let stream: AllocatedStream = self
            .gateway
            .execute_as(Method::POST, &path, Some(&body), true)
            .await?;
        stream
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CloudError::Decode(format!("empty {} url", protocol.as_str())))
    }
}

//! 云端录像查询：有录像的日期、指定时间段内的录像事件。

use camlink_cloud::{CloudError, HttpGateway, Method, decode_result};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct PlaybackPage {
    #[serde(default)]
    datas: Vec<Value>,
}

pub struct RecordingCatalog {
    gateway: Arc<HttpGateway>,
}

impl RecordingCatalog {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    /// 有录像的日期列表；云端未返回时为空。
    pub async fn dates(&self, device_id: &str) -> Result<Vec<String>, CloudError> {
        let path = format!("/v1.0/devices/{device_id}/ipc/playback/get-dates");
        let result = self.gateway.execute(Method::GET, &path, None, true).await?;
        if result.is_null() {
            return Ok(Vec::new());
        }
        let dates: Vec<String> = decode_result(result)?;
        debug!(target: "camlink.playback", device_id = %device_id, count = dates.len(), "recording_dates");
        Ok(dates)
    }

    /// `[start_time, end_time]` 内的录像事件，原样返回。
    pub async fn events(
        &self,
        device_id: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<Value>, CloudError> {
        let path = format!(
            "/v1.0/devices/{device_id}/ipc/playback/video?start_time={start_time}&end_time={end_time}"
        );
        let result = self.gateway.execute(Method::GET, &path, None, true).await?;
        if result.is_null() {
            return Ok(Vec::new());
        }
        let page: PlaybackPage = decode_result(result)?;
        debug!(target: "camlink.playback", device_id = %device_id, count = page.datas.len(), "recording_events");
        Ok(page.datas)
    }
}

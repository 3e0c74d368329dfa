use camlink_cloud::{CloudError, HttpGateway, Method};
use camlink_telemetry::{
    record_discovery_auto, record_discovery_fallback, record_fallback_lookup_failure,
};
use domain::DeviceRecord;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// 设备列表解析策略，按 [`DiscoveryStrategy::ORDER`] 依次尝试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// 通过 token 中的账号 ID 自动发现。
    AutoDiscovery,
    /// 逐个查询配置的设备 ID。
    ConfiguredList,
}

impl DiscoveryStrategy {
    pub const ORDER: [DiscoveryStrategy; 2] = [Self::AutoDiscovery, Self::ConfiguredList];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoDiscovery => "auto_discovery",
            Self::ConfiguredList => "configured_list",
        }
    }
}

/// 账号设备接口的两种返回形态：直接数组，或分页对象。
#[derive(Deserialize)]
#[serde(untagged)]
enum UserDevices {
    List(Vec<DeviceRecord>),
    Page { devices: Vec<DeviceRecord> },
}

impl UserDevices {
    fn into_records(self) -> Vec<DeviceRecord> {
        match self {
            Self::List(records) | Self::Page { devices: records } => records,
        }
    }
}

/// 设备发现服务。
pub struct DeviceDiscovery {
    gateway: Arc<HttpGateway>,
    device_ids: Vec<String>,
}

impl DeviceDiscovery {
    pub fn new(gateway: Arc<HttpGateway>, device_ids: Vec<String>) -> Self {
        Self {
            gateway,
            device_ids,
        }
    }

    pub fn configured_ids(&self) -> &[String] {
        &self.device_ids
    }

    /// 解析设备列表，顺序与数据源返回一致。
    ///
    /// 自动发现返回非空列表即结束；否则回退到配置列表，
    /// 单个设备查询失败不影响其余设备。只有自动发现返回结构错误时才返回 Err。
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, CloudError> {
        for strategy in DiscoveryStrategy::ORDER {
            if let Some(records) = self.run(strategy).await? {
                info!(
                    target: "camlink.discovery",
                    strategy = strategy.as_str(),
                    count = records.len(),
                    "devices_resolved"
                );
                return Ok(records);
            }
        }
        Ok(Vec::new())
    }

    /// 查询单个设备。
    pub async fn fetch_device(&self, device_id: &str) -> Result<DeviceRecord, CloudError> {
        let path = format!("/v1.0/devices/{device_id}");
        self.gateway
            .execute_as(Method::GET, &path, None, true)
            .await
    }

    /// 设备当前状态（原样返回云端 result）。
    pub async fn device_status(&self, device_id: &str) -> Result<Value, CloudError> {
        let path = format!("/v1.0/devices/{device_id}/status");
        self.gateway.execute(Method::GET, &path, None, true).await
    }

    /// `Ok(None)` 表示该策略不适用或无结果，继续下一个策略。
    async fn run(
        &self,
        strategy: DiscoveryStrategy,
    ) -> Result<Option<Vec<DeviceRecord>>, CloudError> {
        match strategy {
            DiscoveryStrategy::AutoDiscovery => self.auto_discover().await,
            DiscoveryStrategy::ConfiguredList => {
                record_discovery_fallback();
                Ok(Some(self.fetch_configured().await))
            }
        }
    }

    async fn auto_discover(&self) -> Result<Option<Vec<DeviceRecord>>, CloudError> {
        let token = match self.gateway.tokens().ensure_valid().await {
            Ok(token) => token,
            Err(err) => {
                warn!(target: "camlink.discovery", error = %err, "token_unavailable_skip_auto_discovery");
                return Ok(None);
            }
        };
        let Some(account_id) = token.account_id else {
            info!(target: "camlink.discovery", "no_account_id_skip_auto_discovery");
            return Ok(None);
        };

        let path = format!("/v1.0/users/{account_id}/devices");
        let result = match self.gateway.execute(Method::GET, &path, None, true).await {
            Ok(result) => result,
            Err(err @ CloudError::Decode(_)) => return Err(err),
            Err(err) => {
                info!(target: "camlink.discovery", error = %err, "auto_discovery_unavailable");
                return Ok(None);
            }
        };
        if result.is_null() {
            return Ok(None);
        }
        let records = serde_json::from_value::<UserDevices>(result)
            .map_err(|err| CloudError::Decode(format!("user devices: {err}")))?
            .into_records();
        if records.is_empty() {
            info!(target: "camlink.discovery", account_id = %account_id, "auto_discovery_empty");
            return Ok(None);
        }
        record_discovery_auto();
        Ok(Some(records))
    }

    async fn fetch_configured(&self) -> Vec<DeviceRecord> {
        if self.device_ids.is_empty() {
            warn!(target: "camlink.discovery", "no_devices_configured");
            return Vec::new();
        }
        let mut records = Vec::with_capacity(self.device_ids.len());
        for device_id in &self.device_ids {
            match self.fetch_device(device_id).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    record_fallback_lookup_failure();
                    warn!(
                        target: "camlink.discovery",
                        device_id = %device_id,
                        error = %err,
                        "device_lookup_failed"
                    );
                }
            }
        }
        records
    }
}

use camlink_cloud::{CloudError, HttpGateway, Method};
use camlink_telemetry::{record_command_failure, record_command_sent};
use domain::{DeviceCommand, PtzDirection};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// 云台控制指令码。
pub const PTZ_CODE: &str = "ptz_control";

/// 方向 → `ptz_control` 取值。
pub fn ptz_value(direction: PtzDirection) -> &'static str {
    match direction {
        PtzDirection::Up => "0",
        PtzDirection::Right => "2",
        PtzDirection::Down => "4",
        PtzDirection::Left => "6",
    }
}

/// 设备命令下发器。
pub struct CommandDispatcher {
    gateway: Arc<HttpGateway>,
}

impl CommandDispatcher {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    /// 云台转动。
    pub async fn ptz(&self, device_id: &str, direction: PtzDirection) -> Result<bool, CloudError> {
        self.dispatch(
            device_id,
            DeviceCommand::new(PTZ_CODE, Some(Value::from(ptz_value(direction)))),
        )
        .await
    }

    /// 通用命令，`code`/`value` 原样透传；`value` 为 None 时请求体中不含该字段。
    pub async fn command(
        &self,
        device_id: &str,
        code: &str,
        value: Option<Value>,
    ) -> Result<bool, CloudError> {
        self.dispatch(device_id, DeviceCommand::new(code, value)).await
    }

    /// 返回云端 `result` 标志；result 缺失视为成功。
    async fn dispatch(&self, device_id: &str, command: DeviceCommand) -> Result<bool, CloudError> {
        let path = format!("/v1.0/devices/{device_id}/commands");
        let body = json!({ "commands": [&command] });

        let result = self
            .gateway
            .execute(Method::POST, &path, Some(&body), true)
            .await;
        let accepted = match result {
            Ok(Value::Bool(flag)) => flag,
            Ok(_) => true,
            Err(err) => {
                record_command_failure();
                warn!(
                    target: "camlink.control",
                    device_id = %device_id,
                    code = %command.code,
                    error = %err,
                    "command_dispatch_failed"
                );
                return Err(err);
            }
        };

        if accepted {
            record_command_sent();
        } else {
            record_command_failure();
        }
        info!(
            target: "camlink.control",
            device_id = %device_id,
            code = %command.code,
            accepted,
            "command_dispatched"
        );
        Ok(accepted)
    }
}

use crate::CloudError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 云端统一响应信封。
#[derive(Debug, Deserialize)]
pub struct CloudEnvelope {
    pub success: bool,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub t: Option<i64>,
}

/// 校验信封并取出 `result`；`success == false` 时返回 RemoteApi 错误。
pub fn unwrap_envelope(body: Value) -> Result<Value, CloudError> {
    let envelope: CloudEnvelope = serde_json::from_value(body)
        .map_err(|err| CloudError::Decode(format!("response envelope: {err}")))?;
    if envelope.success {
        return Ok(envelope.result);
    }
    let code = envelope.code.as_ref().and_then(code_as_i64);
    let message = envelope
        .msg
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| match code {
            Some(code) => format!("remote api error (code {code})"),
            None => "remote api error".to_string(),
        });
    Err(CloudError::RemoteApi { code, message })
}

/// 将 `result` 解码为具体类型。
pub fn decode_result<T: DeserializeOwned>(result: Value) -> Result<T, CloudError> {
    serde_json::from_value(result).map_err(|err| CloudError::Decode(err.to_string()))
}

fn code_as_i64(code: &Value) -> Option<i64> {
    match code {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

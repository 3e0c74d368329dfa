//! 设备云 OpenAPI 访问能力：请求签名、共享 token 与签名调用网关。

mod envelope;
mod error;
mod gateway;
#[cfg(any(test, feature = "testing"))]
mod scripted;
mod signer;
mod token;
mod transport;

pub use envelope::{CloudEnvelope, decode_result, unwrap_envelope};
pub use error::CloudError;
pub use gateway::HttpGateway;
pub use reqwest::Method;
#[cfg(any(test, feature = "testing"))]
pub use scripted::{ScriptedTransport, failure, success};
pub use signer::{Credentials, RequestSigner, SIGN_METHOD, content_sha256, string_to_sign};
pub use token::{EXPIRY_SKEW_MS, TOKEN_PATH, Token, TokenManager};
pub use transport::{CloudRequest, CloudTransport, ReqwestTransport};

/// 当前时间戳（毫秒）。
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

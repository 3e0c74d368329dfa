//! 请求签名。
//!
//! 签名串构成：
//! 1. `contentHash = hex(sha256(body))`，无 body 时对空串求摘要
//! 2. `stringToSign = METHOD \n contentHash \n "" \n path`（path 含 query）
//! 3. `accessId + token(可选) + t + stringToSign` 做 HMAC-SHA256，hex 大写
//!
//! 任何偏差都会让云端返回笼统的鉴权失败，而不是签名错误。

use crate::transport::CloudRequest;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::{Digest, Sha256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// `sign_method` 请求头取值。
pub const SIGN_METHOD: &str = "HMAC-SHA256";

/// 云端访问凭据（启动时加载一次，不可变）。
#[derive(Clone)]
pub struct Credentials {
    pub access_id: String,
    pub access_secret: String,
}

impl Credentials {
    pub fn new(access_id: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            access_secret: access_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_id", &self.access_id)
            .field("access_secret", &"***")
            .finish()
    }
}

/// 请求签名器，无内部状态。
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn access_id(&self) -> &str {
        &self.credentials.access_id
    }

    /// 计算签名。
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> String {
        let content_hash = content_sha256(body.unwrap_or_default());
        let canonical = string_to_sign(method, &content_hash, path);

        let mut mac = HmacSha256::new_from_slice(self.credentials.access_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(self.credentials.access_id.as_bytes());
        if let Some(token) = token {
            mac.update(token.as_bytes());
        }
        mac.update(timestamp.as_bytes());
        mac.update(canonical.as_bytes());
        hex::encode_upper(mac.finalize().into_bytes())
    }

    /// 生成带完整签名请求头的云端请求。
    ///
    /// `token` 为 `None` 时既不参与签名，也不附带 `access_token` 头。
    pub fn signed_request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        token: Option<&str>,
        timestamp_ms: i64,
    ) -> CloudRequest {
        let timestamp = timestamp_ms.to_string();
        let sign = self.sign(method.as_str(), path, &timestamp, token, body.as_deref());
        let mut headers = vec![
            ("client_id", self.credentials.access_id.clone()),
            ("sign", sign),
            ("t", timestamp),
            ("sign_method", SIGN_METHOD.to_string()),
            ("Content-Type", "application/json".to_string()),
        ];
        if let Some(token) = token {
            headers.push(("access_token", token.to_string()));
        }
        CloudRequest {
            method,
            path: path.to_string(),
            headers,
            body,
        }
    }
}

/// 请求体 SHA-256 摘要（hex 小写）。
pub fn content_sha256(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

/// 规范化签名串：四段以 `\n` 连接，第三段（headers）固定为空。
pub fn string_to_sign(method: &str, content_hash: &str, path: &str) -> String {
    [method.to_ascii_uppercase().as_str(), content_hash, "", path].join("\n")
}

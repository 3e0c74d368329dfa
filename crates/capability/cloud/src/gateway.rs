//! 签名调用网关：token → 签名 → 发送 → 信封校验。

use crate::envelope::{decode_result, unwrap_envelope};
use crate::{
    CloudError, CloudTransport, Credentials, ReqwestTransport, RequestSigner, TokenManager,
    now_epoch_ms,
};
use camlink_telemetry::{record_cloud_failure, record_cloud_request};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// 云端 API 网关。
pub struct HttpGateway {
    signer: Arc<RequestSigner>,
    tokens: Arc<TokenManager>,
    transport: Arc<dyn CloudTransport>,
}

impl HttpGateway {
    /// 基于给定传输创建网关，内部新建共享的 TokenManager。
    pub fn new(signer: Arc<RequestSigner>, transport: Arc<dyn CloudTransport>) -> Self {
        let tokens = Arc::new(TokenManager::new(signer.clone(), transport.clone()));
        Self {
            signer,
            tokens,
            transport,
        }
    }

    /// 使用 reqwest 连接指定区域的云端。
    pub fn connect(credentials: Credentials, base_url: &str) -> Result<Self, CloudError> {
        let transport = Arc::new(ReqwestTransport::new(base_url)?);
        Ok(Self::new(Arc::new(RequestSigner::new(credentials)), transport))
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// 执行一次签名调用，返回信封中的 `result`。
    ///
    /// `requires_auth` 为 true 时先确保 token 有效，且 token 参与签名并随请求发送。
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<Value, CloudError> {
        let token = if requires_auth {
            Some(self.tokens.ensure_valid().await?)
        } else {
            None
        };
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| CloudError::Decode(err.to_string()))?;
        let request = self.signer.signed_request(
            method.clone(),
            path,
            body,
            token.as_ref().map(|token| token.value.as_str()),
            now_epoch_ms(),
        );

        debug!(target: "camlink.cloud", method = %method, path, "cloud_request");
        record_cloud_request();
        let result = match self.transport.send(request).await {
            Ok(body) => unwrap_envelope(body),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            record_cloud_failure();
            warn!(target: "camlink.cloud", method = %method, path, error = %err, "cloud_request_failed");
        }
        result
    }

    /// 执行调用并把 `result` 解码为具体类型。
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<T, CloudError> {
        let result = self.execute(method, path, body, requires_auth).await?;
        decode_result(result)
    }
}

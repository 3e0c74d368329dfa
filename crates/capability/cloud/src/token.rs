//! 共享 access token 与刷新生命周期。
//!
//! 状态机：`UNSET → VALID → EXPIRED → VALID → …`
//!
//! - 读取方总是拿到完整的 Token（整体替换，不做字段级更新）
//! - 并发检测到过期时只发起一次刷新，所有等待者共享同一结果（single-flight）
//! - 刷新失败后清空在途槽位，下一次调用重新发起

use crate::envelope::{decode_result, unwrap_envelope};
use crate::{CloudError, CloudTransport, RequestSigner, now_epoch_ms};
use camlink_telemetry::{
    record_cloud_failure, record_cloud_request, record_token_refresh, record_token_refresh_failure,
};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::Method;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// token 接口路径（不带 token 签名）。
pub const TOKEN_PATH: &str = "/v1.0/token?grant_type=1";

/// 提前视为过期的时间（毫秒），吸收时钟偏差与网络延迟。
pub const EXPIRY_SKEW_MS: i64 = 60_000;

/// 当前 access token。
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: String,
    /// 云端给出的真实过期时间（毫秒）。
    pub expires_at_ms: i64,
    /// token 所属账号（uid），自动发现依赖它。
    pub account_id: Option<String>,
}

impl Token {
    /// 在 `now_ms` 时刻是否仍可使用（已扣除 [`EXPIRY_SKEW_MS`]）。
    pub fn is_fresh_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_add(EXPIRY_SKEW_MS) < self.expires_at_ms
    }
}

#[derive(Debug, Deserialize)]
struct TokenResult {
    access_token: String,
    /// 有效期（秒）。
    expire_time: i64,
    #[serde(default)]
    uid: Option<String>,
}

type RefreshFlight = Shared<BoxFuture<'static, Result<Token, CloudError>>>;

struct TokenState {
    signer: Arc<RequestSigner>,
    transport: Arc<dyn CloudTransport>,
    token: RwLock<Option<Token>>,
    inflight: Mutex<Option<RefreshFlight>>,
}

/// token 管理器，由各组件通过 `Arc` 共享。
#[derive(Clone)]
pub struct TokenManager {
    state: Arc<TokenState>,
}

impl TokenManager {
    pub fn new(signer: Arc<RequestSigner>, transport: Arc<dyn CloudTransport>) -> Self {
        Self {
            state: Arc::new(TokenState {
                signer,
                transport,
                token: RwLock::new(None),
                inflight: Mutex::new(None),
            }),
        }
    }

    /// 当前保存的 token（不触发刷新）。
    pub async fn current(&self) -> Option<Token> {
        self.state.token.read().await.clone()
    }

    /// 返回可用 token，必要时刷新。
    pub async fn ensure_valid(&self) -> Result<Token, CloudError> {
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        let flight = {
            let mut slot = self.state.inflight.lock().await;
            match slot.as_ref() {
                Some(flight) => flight.clone(),
                None => {
                    // 拿到槽位后再确认一次：上一轮刷新可能刚刚完成。
                    if let Some(token) = self.fresh_token().await {
                        return Ok(token);
                    }
                    let state = Arc::clone(&self.state);
                    let flight = async move { state.refresh().await }.boxed().shared();
                    *slot = Some(flight.clone());
                    flight
                }
            }
        };
        flight.await
    }

    async fn fresh_token(&self) -> Option<Token> {
        let now_ms = now_epoch_ms();
        self.state
            .token
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_fresh_at(now_ms))
            .cloned()
    }
}

impl TokenState {
    async fn refresh(&self) -> Result<Token, CloudError> {
        let result = self.request_token().await;
        match &result {
            Ok(token) => {
                *self.token.write().await = Some(token.clone());
                record_token_refresh();
                info!(
                    target: "camlink.cloud",
                    account_id = token.account_id.as_deref().unwrap_or(""),
                    expires_at_ms = token.expires_at_ms,
                    "token_refreshed"
                );
            }
            Err(err) => {
                record_token_refresh_failure();
                warn!(target: "camlink.cloud", error = %err, "token_refresh_failed");
            }
        }
        // 先写 token 再清槽位，保证后来者要么看到新 token，要么拿到已完成的 flight。
        *self.inflight.lock().await = None;
        result
    }

    async fn request_token(&self) -> Result<Token, CloudError> {
        let now_ms = now_epoch_ms();
        let request = self
            .signer
            .signed_request(Method::GET, TOKEN_PATH, None, None, now_ms);
        record_cloud_request();
        let result = match self.transport.send(request).await {
            Ok(body) => unwrap_envelope(body).and_then(decode_result::<TokenResult>),
            Err(err) => Err(err),
        };
        let result = result.inspect_err(|_| record_cloud_failure())?;
        Ok(Token {
            value: result.access_token,
            expires_at_ms: now_ms.saturating_add(result.expire_time.saturating_mul(1000)),
            account_id: result.uid.filter(|uid| !uid.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at_ms: i64) -> Token {
        Token {
            value: "tok".to_string(),
            expires_at_ms,
            account_id: None,
        }
    }

    #[test]
    fn fresh_outside_skew_window() {
        let now = 1_700_000_000_000;
        assert!(token(now + 61_000).is_fresh_at(now));
        assert!(!token(now + 59_000).is_fresh_at(now));
        assert!(!token(now + EXPIRY_SKEW_MS).is_fresh_at(now));
        assert!(!token(now - 1).is_fresh_at(now));
    }
}

//! 脚本化传输（用于测试与本地联调）。
//!
//! 按 `method + path`（可选 body 片段）匹配预置响应，并记录所有收到的请求。

use crate::token::TOKEN_PATH;
use crate::{CloudError, CloudRequest, CloudTransport};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;

/// 成功信封。
pub fn success(result: Value) -> Value {
    json!({ "success": true, "result": result, "t": 0 })
}

/// 失败信封。
pub fn failure(code: i64, msg: &str) -> Value {
    json!({ "success": false, "code": code, "msg": msg, "t": 0 })
}

struct Rule {
    method: Method,
    path: String,
    body_contains: Option<String>,
    reply: Result<Value, CloudError>,
}

impl Rule {
    fn matches(&self, request: &CloudRequest) -> bool {
        if self.method != request.method || self.path != request.path {
            return false;
        }
        match (&self.body_contains, &request.body) {
            (None, _) => true,
            (Some(fragment), Some(body)) => body.contains(fragment.as_str()),
            (Some(_), None) => false,
        }
    }
}

/// 预置响应的传输实现。
#[derive(Default)]
pub struct ScriptedTransport {
    rules: Vec<Rule>,
    latency: Option<Duration>,
    calls: Mutex<Vec<CloudRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置 token 接口响应。
    pub fn with_token(self, access_token: &str, expire_seconds: i64, uid: Option<&str>) -> Self {
        let mut result = json!({
            "access_token": access_token,
            "expire_time": expire_seconds,
            "refresh_token": "refresh",
        });
        if let Some(uid) = uid {
            result["uid"] = json!(uid);
        }
        self.respond(Method::GET, TOKEN_PATH, Ok(success(result)))
    }

    /// 每次发送前等待的时长，用于制造并发重叠。
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// 预置响应；先注册的规则优先。
    pub fn respond(mut self, method: Method, path: &str, reply: Result<Value, CloudError>) -> Self {
        self.rules.push(Rule {
            method,
            path: path.to_string(),
            body_contains: None,
            reply,
        });
        self
    }

    /// 仅当请求体包含 `fragment` 时匹配的响应。
    pub fn respond_when(
        mut self,
        method: Method,
        path: &str,
        fragment: &str,
        reply: Result<Value, CloudError>,
    ) -> Self {
        self.rules.push(Rule {
            method,
            path: path.to_string(),
            body_contains: Some(fragment.to_string()),
            reply,
        });
        self
    }

    /// 已收到的全部请求（按发送顺序）。
    pub fn calls(&self) -> Vec<CloudRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 发往指定路径的请求数。
    pub fn count(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }
}

#[async_trait]
impl CloudTransport for ScriptedTransport {
    async fn send(&self, request: CloudRequest) -> Result<Value, CloudError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(&request))
            .map(|rule| rule.reply.clone())
            .unwrap_or_else(|| {
                Err(CloudError::Transport(format!(
                    "no scripted reply for {} {}",
                    request.method, request.path
                )))
            })
    }
}

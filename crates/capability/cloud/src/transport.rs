use crate::CloudError;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// 已签名、待发送的云端请求。
#[derive(Debug, Clone)]
pub struct CloudRequest {
    pub method: Method,
    /// 含 query 的路径，与签名时使用的完全一致。
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl CloudRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// 云端传输抽象：发送请求并返回解析后的 JSON 响应体（信封尚未校验）。
#[async_trait]
pub trait CloudTransport: Send + Sync {
    async fn send(&self, request: CloudRequest) -> Result<Value, CloudError>;
}

/// 基于 reqwest 的传输实现。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CloudError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| CloudError::Transport(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CloudTransport for ReqwestTransport {
    async fn send(&self, request: CloudRequest) -> Result<Value, CloudError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| CloudError::Transport(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| CloudError::Transport(err.to_string()))?;
        tracing::debug!(
            target: "camlink.cloud",
            status = status.as_u16(),
            body = %truncate(&text, 500),
            "cloud_response"
        );

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => {
                Err(CloudError::Transport(format!("http status {status}")))
            }
            Err(err) => Err(CloudError::Decode(err.to_string())),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("设备云接口", 2), "设备");
    }

    #[test]
    fn base_url_trailing_slash_removed() {
        let transport = ReqwestTransport::with_client(reqwest::Client::new(), "https://example.com/");
        assert_eq!(transport.base_url(), "https://example.com");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = CloudRequest {
            method: Method::GET,
            path: "/".to_string(),
            headers: vec![("Content-Type", "application/json".to_string())],
            body: None,
        };
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("access_token"), None);
    }
}

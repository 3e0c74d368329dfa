use std::sync::Arc;
use std::time::Duration;

use camlink_cloud::{
    CloudError, Credentials, Method, RequestSigner, ScriptedTransport, TOKEN_PATH, TokenManager,
    failure,
};

fn manager(transport: Arc<ScriptedTransport>) -> TokenManager {
    let signer = Arc::new(RequestSigner::new(Credentials::new("id", "secret")));
    TokenManager::new(signer, transport)
}

#[tokio::test]
async fn token_outside_skew_is_reused() {
    let transport = Arc::new(ScriptedTransport::new().with_token("tok-1", 61, Some("uid-1")));
    let tokens = manager(transport.clone());

    let first = tokens.ensure_valid().await.expect("token");
    let second = tokens.ensure_valid().await.expect("token");
    assert_eq!(first.value, "tok-1");
    assert_eq!(first, second);
    assert_eq!(transport.count(TOKEN_PATH), 1);
}

#[tokio::test]
async fn token_inside_skew_is_refreshed_before_use() {
    let transport = Arc::new(ScriptedTransport::new().with_token("tok-1", 59, Some("uid-1")));
    let tokens = manager(transport.clone());

    tokens.ensure_valid().await.expect("token");
    tokens.ensure_valid().await.expect("token");
    assert_eq!(transport.count(TOKEN_PATH), 2);
}

#[tokio::test]
async fn refresh_records_account_and_expiry() {
    let transport = Arc::new(ScriptedTransport::new().with_token("tok-1", 7200, Some("uid-9")));
    let tokens = manager(transport.clone());
    assert!(tokens.current().await.is_none());

    let before = camlink_cloud::now_epoch_ms();
    let token = tokens.ensure_valid().await.expect("token");
    assert_eq!(token.account_id.as_deref(), Some("uid-9"));
    assert!(token.expires_at_ms >= before + 7_200_000);
    assert_eq!(tokens.current().await, Some(token));

    // token 请求本身不带 access_token
    let calls = transport.calls();
    assert_eq!(calls[0].header("access_token"), None);
    assert_eq!(calls[0].method, Method::GET);
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_token("tok-1", 7200, Some("uid-1"))
            .with_latency(Duration::from_millis(50)),
    );
    let tokens = manager(transport.clone());

    let callers = (0..8).map(|_| {
        let tokens = tokens.clone();
        tokio::spawn(async move { tokens.ensure_valid().await })
    });
    let results = futures::future::join_all(callers).await;

    for result in results {
        let token = result.expect("join").expect("token");
        assert_eq!(token.value, "tok-1");
    }
    assert_eq!(transport.count(TOKEN_PATH), 1);
}

#[tokio::test]
async fn concurrent_callers_share_refresh_failure_then_retry() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(Method::GET, TOKEN_PATH, Ok(failure(1004, "sign invalid")))
            .with_latency(Duration::from_millis(50)),
    );
    let tokens = manager(transport.clone());

    let (first, second) = tokio::join!(tokens.ensure_valid(), tokens.ensure_valid());
    let expected = CloudError::RemoteApi {
        code: Some(1004),
        message: "sign invalid".to_string(),
    };
    assert_eq!(first, Err(expected.clone()));
    assert_eq!(second, Err(expected));
    assert_eq!(transport.count(TOKEN_PATH), 1);

    // 失败不会卡住槽位，下一次调用重新请求
    let _ = tokens.ensure_valid().await;
    assert_eq!(transport.count(TOKEN_PATH), 2);
}

#[tokio::test]
async fn malformed_token_result_is_decode_error() {
    let transport = Arc::new(ScriptedTransport::new().respond(
        Method::GET,
        TOKEN_PATH,
        Ok(camlink_cloud::success(serde_json::json!({ "expire_time": 7200 }))),
    ));
    let tokens = manager(transport);
    let err = tokens.ensure_valid().await.expect_err("decode");
    assert!(matches!(err, CloudError::Decode(_)));
}

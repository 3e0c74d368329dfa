use std::sync::Arc;

use camlink_cloud::{
    CloudError, Credentials, HttpGateway, Method, RequestSigner, ScriptedTransport, TOKEN_PATH,
    failure, success,
};
use serde::Deserialize;
use serde_json::json;

fn gateway(transport: Arc<ScriptedTransport>) -> HttpGateway {
    let signer = Arc::new(RequestSigner::new(Credentials::new("access-id", "access-secret")));
    HttpGateway::new(signer, transport)
}

#[tokio::test]
async fn authenticated_call_signs_with_token() {
    let path = "/v1.0/devices/dev-1/status";
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_token("tok-1", 7200, Some("uid-1"))
            .respond(Method::GET, path, Ok(success(json!([{ "code": "switch", "value": true }])))),
    );
    let gateway = gateway(transport.clone());

    let result = gateway
        .execute(Method::GET, path, None, true)
        .await
        .expect("result");
    assert_eq!(result, json!([{ "code": "switch", "value": true }]));

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, TOKEN_PATH);
    let call = &calls[1];
    assert_eq!(call.header("access_token"), Some("tok-1"));
    let signer = RequestSigner::new(Credentials::new("access-id", "access-secret"));
    let expected = signer.sign("GET", path, call.header("t").expect("t"), Some("tok-1"), None);
    assert_eq!(call.header("sign"), Some(expected.as_str()));
}

#[tokio::test]
async fn unauthenticated_call_skips_token() {
    let path = "/v1.0/public";
    let transport = Arc::new(ScriptedTransport::new().respond(
        Method::GET,
        path,
        Ok(success(json!("pong"))),
    ));
    let gateway = gateway(transport.clone());

    let result = gateway
        .execute(Method::GET, path, None, false)
        .await
        .expect("result");
    assert_eq!(result, json!("pong"));
    assert_eq!(transport.count(TOKEN_PATH), 0);
    assert_eq!(transport.calls()[0].header("access_token"), None);
}

#[tokio::test]
async fn body_is_sent_as_signed() {
    let path = "/v1.0/devices/dev-1/commands";
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_token("tok-1", 7200, None)
            .respond(Method::POST, path, Ok(success(json!(true)))),
    );
    let gateway = gateway(transport.clone());
    let body = json!({ "commands": [{ "code": "ptz_control", "value": "6" }] });

    gateway
        .execute(Method::POST, path, Some(&body), true)
        .await
        .expect("result");

    let call = transport.calls().pop().expect("call");
    assert_eq!(
        call.body.as_deref(),
        Some(r#"{"commands":[{"code":"ptz_control","value":"6"}]}"#)
    );
}

#[tokio::test]
async fn remote_failure_surfaces_message() {
    let path = "/v1.0/devices/dev-1";
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_token("tok-1", 7200, None)
            .respond(Method::GET, path, Ok(failure(1106, "permission deny"))),
    );
    let gateway = gateway(transport);

    let err = gateway
        .execute(Method::GET, path, None, true)
        .await
        .expect_err("remote failure");
    assert!(err.is_remote());
    assert_eq!(err.to_string(), "permission deny");
}

#[tokio::test]
async fn token_failure_stops_before_business_call() {
    let path = "/v1.0/devices/dev-1";
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(
                Method::GET,
                TOKEN_PATH,
                Err(CloudError::Transport("connection refused".to_string())),
            )
            .respond(Method::GET, path, Ok(success(json!({})))),
    );
    let gateway = gateway(transport.clone());

    let err = gateway
        .execute(Method::GET, path, None, true)
        .await
        .expect_err("token failure");
    assert_eq!(err, CloudError::Transport("connection refused".to_string()));
    assert_eq!(transport.count(path), 0);
}

#[derive(Debug, Deserialize)]
struct UrlResult {
    url: String,
}

#[tokio::test]
async fn typed_result_decoding() {
    let path = "/v1.0/typed";
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_token("tok-1", 7200, None)
            .respond(Method::GET, path, Ok(success(json!({ "url": "https://x" })))),
    );
    let gateway = gateway(transport);

    let typed: UrlResult = gateway
        .execute_as(Method::GET, path, None, true)
        .await
        .expect("typed");
    assert_eq!(typed.url, "https://x");

    let err = gateway
        .execute_as::<Vec<String>>(Method::GET, path, None, true)
        .await
        .expect_err("shape mismatch");
    assert!(matches!(err, CloudError::Decode(_)));
}

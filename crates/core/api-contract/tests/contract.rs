use api_contract::{
    CamerasQuery, CommandRequest, ErrorBody, PtzRequest, RecordingQuery, StreamUrlResponse,
};
use serde_json::{Value, json};

#[test]
fn error_body_has_single_error_field() {
    let value = serde_json::to_value(ErrorBody::new("Invalid direction")).expect("serialize");
    assert_eq!(value, json!({ "error": "Invalid direction" }));
}

#[test]
fn stream_url_response_is_camel_case() {
    let response = StreamUrlResponse {
        stream_url: "https://cdn.example/live.m3u8".to_string(),
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert!(value.get("streamUrl").is_some());
    assert!(value.get("stream_url").is_none());
}

#[test]
fn include_streams_requires_literal_true() {
    let query: CamerasQuery =
        serde_json::from_value(json!({ "includeStreams": "true" })).expect("parse");
    assert!(query.wants_streams());
    let query: CamerasQuery =
        serde_json::from_value(json!({ "includeStreams": "TRUE" })).expect("parse");
    assert!(!query.wants_streams());
    assert!(!CamerasQuery::default().wants_streams());
}

#[test]
fn command_request_tolerates_missing_fields() {
    let req: CommandRequest = serde_json::from_str("{}").expect("parse");
    assert!(req.code.is_none());
    assert_eq!(req.value, None);

    let req: CommandRequest =
        serde_json::from_str(r#"{"code":"basic_flip","value":true}"#).expect("parse");
    assert_eq!(req.code.as_deref(), Some("basic_flip"));
    assert_eq!(req.value, Some(json!(true)));
}

#[test]
fn command_request_keeps_explicit_null() {
    let req: CommandRequest =
        serde_json::from_str(r#"{"code":"basic_flip","value":null}"#).expect("parse");
    assert_eq!(req.value, Some(Value::Null));
}

#[test]
fn ptz_request_direction_is_optional() {
    let req: PtzRequest = serde_json::from_str("{}").expect("parse");
    assert!(req.direction.is_none());
}

#[test]
fn recording_query_uses_camel_case() {
    let query: RecordingQuery =
        serde_json::from_value(json!({ "startTime": "1", "endTime": "2" })).expect("parse");
    assert_eq!(query.start_time.as_deref(), Some("1"));
    assert_eq!(query.end_time.as_deref(), Some("2"));
}

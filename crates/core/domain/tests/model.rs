use domain::{Camera, DeviceRecord, PtzDirection};
use serde_json::json;

#[test]
fn device_record_keeps_unknown_fields() {
    let payload = json!({
        "id": "dev-1",
        "name": "Front door",
        "category": "dghd",
        "online": true,
        "product_name": "Doorbell",
        "update_time": 1_700_000_000,
        "uuid": "uuid-1",
        "ip": "10.0.0.8",
        "time_zone": "+01:00"
    });
    let record: DeviceRecord = serde_json::from_value(payload).expect("parse");
    assert_eq!(record.id, "dev-1");
    assert_eq!(record.update_time, Some(1_700_000_000));
    assert_eq!(record.extra.get("ip"), Some(&json!("10.0.0.8")));

    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(value.get("time_zone"), Some(&json!("+01:00")));
    assert_eq!(value.get("product_name"), Some(&json!("Doorbell")));
}

#[test]
fn device_record_requires_id_and_category() {
    let missing_category = json!({ "id": "dev-1", "name": "x" });
    assert!(serde_json::from_value::<DeviceRecord>(missing_category).is_err());
    let missing_id = json!({ "category": "sp" });
    assert!(serde_json::from_value::<DeviceRecord>(missing_id).is_err());
}

#[test]
fn camera_serializes_presentation_names() {
    let camera = Camera {
        id: "dev-1".to_string(),
        name: "Garden".to_string(),
        device_id: "uuid-1".to_string(),
        is_online: true,
        supports_ptz: true,
        category: "sp".to_string(),
        last_seen: "2023-11-14T22:13:20.000Z".to_string(),
        stream_url: None,
    };
    let value = serde_json::to_value(camera).expect("serialize");
    assert_eq!(value.get("supportsPTZ"), Some(&json!(true)));
    assert_eq!(value.get("deviceId"), Some(&json!("uuid-1")));
    assert_eq!(value.get("isOnline"), Some(&json!(true)));
    assert!(value.get("lastSeen").is_some());
    assert!(value.get("streamUrl").is_none());
}

#[test]
fn ptz_direction_parses_known_values_only() {
    assert_eq!("left".parse::<PtzDirection>(), Ok(PtzDirection::Left));
    assert_eq!("up".parse::<PtzDirection>(), Ok(PtzDirection::Up));
    assert!("diagonal".parse::<PtzDirection>().is_err());
    assert!("LEFT".parse::<PtzDirection>().is_err());
}

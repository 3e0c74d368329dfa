use camlink_config::{AppConfig, DEFAULT_BASE_URL};

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("TUYA_ACCESS_ID", "access-id");
        std::env::set_var("TUYA_ACCESS_SECRET", "access-secret");
        std::env::set_var("TUYA_DEVICE_IDS", "dev-1, dev-2,,dev-3");
        std::env::set_var("CAMLINK_HTTP_ADDR", "127.0.0.1:5001");
        std::env::remove_var("TUYA_BASE_URL");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:5001");
    assert_eq!(config.access_id, "access-id");
    assert_eq!(config.access_secret, "access-secret");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.device_ids, vec!["dev-1", "dev-2", "dev-3"]);
}

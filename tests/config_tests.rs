// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use viewfinder::Config;

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    // Check sensible defaults
    assert_eq!(
        config.last_device_id, None,
        "No device should be remembered by default"
    );
    assert_eq!(config.capture_width, 1280);
    assert_eq!(config.capture_height, 720);
    assert_eq!(config.framerate, 30, "Default framerate should be 30");
}

#[test]
fn test_config_survives_json_roundtrip() {
    let config = Config {
        last_device_id: Some("/dev/video1".to_string()),
        capture_width: 640,
        capture_height: 480,
        framerate: 15,
    };

    let json = serde_json::to_string(&config).expect("config should serialize");
    let restored: Config = serde_json::from_str(&json).expect("config should deserialize");
    assert_eq!(restored, config);
}

#[test]
fn test_config_tolerates_unknown_and_missing_fields() {
    // Old or hand-edited files must not break loading
    let restored: Config =
        serde_json::from_str(r#"{"capture_width": 1920, "some_future_field": true}"#)
            .expect("partial config should deserialize");
    assert_eq!(restored.capture_width, 1920);
    assert_eq!(restored.capture_height, 720, "Missing fields use defaults");
}

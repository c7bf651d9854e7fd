// Configuration module unit tests

use mediaport::config::*;

#[test]
fn test_can_deserialize_minimal_valid_yaml_config() {
    let config: Config = serde_yaml::from_str("storage: {}\n").expect("Failed to deserialize YAML");
    let storage = config.storage.expect("storage section");
    assert_eq!(storage.region, mediaport::constants::DEFAULT_REGION);
    assert_eq!(storage.cache_control_years, 1);
    assert!(storage.endpoint.is_none());
    assert!(!storage.path_style());
}

#[test]
fn test_force_path_style_overrides_endpoint_default() {
    let yaml = r#"
storage:
  endpoint: http://localhost:9000
  force_path_style: false
"#;
    let config: Config = serde_yaml::from_str(yaml).expect("Failed to deserialize YAML");
    assert!(!config.storage.unwrap().path_style());
}

#[test]
fn test_email_defaults() {
    let config: Config =
        serde_yaml::from_str("email:\n  sender_address: a@example.com\n").unwrap();
    let email = config.email.unwrap();
    assert!(email.enabled_token().is_none());
    assert_eq!(email.endpoint, "https://api.sendgrid.com/v3/mail/send");
    assert_eq!(email.timeout, 30);
}

#[test]
fn test_logging_defaults_to_json_info() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_validate_rejects_non_http_endpoint() {
    let config = Config {
        storage: Some(StorageConfig {
            endpoint: Some("localhost:9000".into()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(config.validate().unwrap_err().contains("endpoint"));
}

#[test]
fn test_validate_rejects_cdn_host_with_path() {
    let config = Config {
        storage: Some(StorageConfig {
            cdn_host: Some("cdn.example.com/assets".into()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_sender() {
    let config = Config {
        email: Some(EmailSettings {
            api_token: Some("SG.x".into()),
            sender_address: "nobody".into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(config.validate().unwrap_err().contains("sender_address"));
}

#[test]
fn test_config_roundtrips_through_yaml() {
    let config = Config {
        storage: Some(StorageConfig {
            cdn_host: Some("cdn.example.com".into()),
            ..Default::default()
        }),
        email: None,
        logging: LoggingConfig {
            level: "debug".into(),
            format: LogFormat::Pretty,
        },
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}

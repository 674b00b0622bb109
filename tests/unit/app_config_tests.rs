/*!
 * Tests for application configuration
 */

use subgen::app_config::{Config, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_shouldCarryDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "vietnamese");
    assert_eq!(config.translation.endpoint, "https://generativelanguage.googleapis.com");
    assert_eq!(config.translation.model, "gemini-1.5-flash");
    assert_eq!(config.translation.batch_size, 20);
    assert_eq!(config.translation.temperature, 0.1);
    assert_eq!(config.translation.top_k, 1);
    assert_eq!(config.translation.top_p, 0.95);
    assert_eq!(config.translation.max_output_tokens, 8192);
    assert_eq!(config.transcription.model, "whisper-1");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test the default configuration validates
#[test]
fn test_validate_withDefaultConfig_shouldSucceed() {
    assert!(Config::default().validate().is_ok());
}

/// Test an empty JSON object deserializes to the defaults
#[test]
fn test_deserialize_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.translation.batch_size, 20);
    assert_eq!(config.target_language, "vietnamese");
}

/// Test configuration round-trips through JSON
#[test]
fn test_serialize_thenDeserialize_shouldRoundTrip() {
    let mut config = Config::default();
    config.target_language = "english".to_string();
    config.translation.api_key = "test-key".to_string();
    config.translation.batch_size = 10;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let loaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(loaded.target_language, "english");
    assert_eq!(loaded.translation.api_key, "test-key");
    assert_eq!(loaded.translation.batch_size, 10);
}

/// Test validation failures
#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.translation.batch_size = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.model = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.transcription.endpoint = String::new();
    assert!(config.validate().is_err());
}

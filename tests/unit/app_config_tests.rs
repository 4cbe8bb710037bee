/*!
 * Tests for application configuration
 */

use anyhow::Result;
use polyreply::app_config::{Config, LogLevel};

use crate::common;

#[test]
fn test_config_default_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.provider.endpoint, "https://api-inference.huggingface.co");
    assert!(config.provider.api_key.is_empty());
    assert_eq!(config.provider.timeout_secs, 30);
    assert_eq!(config.provider.retry_count, 3);
    assert_eq!(config.provider.retry_backoff_ms, 1000);
    assert!(config.provider.wait_for_model);
    assert!(!config.preload_models);
    assert_eq!(config.static_dir, "static");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_validate_withDefaults_shouldSucceed() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withEmptyHost_shouldFail() {
    let mut config = Config::default();
    config.server.host = String::new();

    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("host"));
}

#[test]
fn test_config_validate_withEmptyEndpoint_shouldFail() {
    let mut config = Config::default();
    config.provider.endpoint = String::new();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withMalformedEndpoint_shouldFail() {
    let mut config = Config::default();
    config.provider.endpoint = "not a url".to_string();

    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid provider endpoint"));
}

#[test]
fn test_config_validate_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.provider.timeout_secs = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withEmptyStaticDir_shouldFail() {
    let mut config = Config::default();
    config.static_dir = String::new();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_fromFile_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{
            "server": { "host": "127.0.0.1", "port": 9000 },
            "provider": { "api_key": "hf_test_token" },
            "preload_models": true
        }"#,
    )?;

    let config = Config::from_file(&config_path)?;

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.provider.api_key, "hf_test_token");
    // Unspecified fields fall back to their defaults
    assert_eq!(config.provider.endpoint, "https://api-inference.huggingface.co");
    assert_eq!(config.provider.retry_count, 3);
    assert!(config.preload_models);
    assert_eq!(config.log_level, LogLevel::Info);

    Ok(())
}

#[test]
fn test_config_fromFile_withEmptyObject_shouldMatchDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{}")?;

    let config = Config::from_file(&config_path)?;

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.static_dir, "static");

    Ok(())
}

#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    let result = Config::from_file("/nonexistent/path/conf.json");
    assert!(result.is_err());
}

#[test]
fn test_config_fromFile_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{not json")?;

    assert!(Config::from_file(&config_path).is_err());

    Ok(())
}

#[test]
fn test_config_fromFile_withInvalidValues_shouldFailValidation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "provider": { "timeout_secs": 0 } }"#,
    )?;

    assert!(Config::from_file(&config_path).is_err());

    Ok(())
}

#[test]
fn test_config_toFile_thenFromFile_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("saved.json");

    let mut config = Config::default();
    config.server.port = 8080;
    config.provider.api_key = "hf_roundtrip".to_string();
    config.log_level = LogLevel::Debug;
    config.to_file(&config_path)?;

    let loaded = Config::from_file(&config_path)?;

    assert_eq!(loaded.server.port, 8080);
    assert_eq!(loaded.provider.api_key, "hf_roundtrip");
    assert_eq!(loaded.log_level, LogLevel::Debug);

    Ok(())
}

#[test]
fn test_logLevel_serialization_shouldBeLowercase() -> Result<()> {
    let json = serde_json::to_string(&LogLevel::Debug)?;
    assert_eq!(json, "\"debug\"");

    let parsed: LogLevel = serde_json::from_str("\"warn\"")?;
    assert_eq!(parsed, LogLevel::Warn);

    Ok(())
}

/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use anyhow::Result;
use tempfile::TempDir;

use storyshape::app_config::{Config, ScorerProvider, TokenizerKind};
use storyshape::story_processor::GUTENBERG_START_MARKER;

/// Test that the default configuration is valid
#[test]
fn test_config_withDefaults_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.segment_length, 50);
    assert_eq!(config.window_length, 5);
    assert_eq!(config.stride, 1);
    assert_eq!(config.markers.start, GUTENBERG_START_MARKER);
    assert_eq!(config.scorer.provider, ScorerProvider::Inference);
    assert_eq!(config.tokenizer.kind, TokenizerKind::Heuristic);
}

/// Test that zero-valued core parameters are rejected before any I/O
#[test]
fn test_config_withZeroParameters_shouldFailValidation() {
    let mut config = Config::default();
    config.segment_length = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.window_length = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.stride = 0;
    assert!(config.validate().is_err());
}

/// Test that a malformed endpoint URL fails validation
#[test]
fn test_config_withInvalidEndpoint_shouldFailValidation() {
    let mut config = Config::default();
    config.scorer.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Test that a pretrained tokenizer without a path fails validation
#[test]
fn test_config_withPretrainedTokenizerNoPath_shouldFailValidation() {
    let mut config = Config::default();
    config.tokenizer.kind = TokenizerKind::Pretrained;
    config.tokenizer.path = String::new();
    assert!(config.validate().is_err());
}

/// Test that missing fields fall back to serde defaults
#[test]
fn test_config_withPartialJson_shouldUseDefaults() -> Result<()> {
    let json = r#"{ "segment_length": 25, "scorer": { "type": "mock" } }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.segment_length, 25);
    assert_eq!(config.window_length, 5);
    assert_eq!(config.scorer.provider, ScorerProvider::Mock);
    assert_eq!(
        config.scorer.model,
        "distilbert-base-uncased-finetuned-sst-2-english"
    );
    Ok(())
}

/// Test write-then-load round trip through a config file
#[test]
fn test_config_withFileRoundTrip_shouldPreserveFields() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.window_length = 9;
    config.stride = 3;
    config.markers.start = "### BEGIN".to_string();
    config.write_to_file(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.window_length, 9);
    assert_eq!(loaded.stride, 3);
    assert_eq!(loaded.markers.start, "### BEGIN");
    Ok(())
}

/// Test provider identifier parsing and display
#[test]
fn test_scorer_provider_withIdentifiers_shouldRoundTrip() {
    assert_eq!(
        ScorerProvider::from_str("inference").unwrap(),
        ScorerProvider::Inference
    );
    assert_eq!(ScorerProvider::from_str("MOCK").unwrap(), ScorerProvider::Mock);
    assert!(ScorerProvider::from_str("ollama").is_err());

    assert_eq!(ScorerProvider::Inference.to_string(), "inference");
    assert_eq!(ScorerProvider::Mock.display_name(), "Mock");
}

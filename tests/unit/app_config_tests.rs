/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::fs;
use summarist::app_config::{Config, LogLevel, SummaryBackend, TranslationProvider};
use summarist::summarization::MODEL_ID;
use crate::common;

/// Test that the default config uses the pretrained summarization model
#[test]
fn test_default_config_withNoOverrides_shouldUseBartModel() {
    let config = Config::default();

    assert_eq!(config.summarizer.model, MODEL_ID);
    assert_eq!(config.summarizer.backend, SummaryBackend::HuggingFace);
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert!(!config.acquisition.skip_empty_pdf_pages);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that the default config passes validation
#[test]
fn test_validate_withDefaultConfig_shouldSucceed() {
    assert!(Config::default().validate().is_ok());
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("summarist.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.summarizer.model, MODEL_ID);

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.translation, config.translation);
    Ok(())
}

/// Test that a partial config file is completed with defaults
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "partial.json",
        r#"{"acquisition": {"skip_empty_pdf_pages": true}, "translation": {"provider": "ollama"}, "log_level": "debug"}"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert!(config.acquisition.skip_empty_pdf_pages);
    assert_eq!(config.acquisition.request_timeout_secs, 30);
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.translation.get_model(), "llama3.2:3b");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that malformed JSON is reported instead of replaced
#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    assert_eq!(fs::read_to_string(&path)?, "{ not json");
    Ok(())
}

/// Test that Anthropic translation requires an API key
#[test]
fn test_validate_withAnthropicAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(config.validate().is_err());

    for provider in config.translation.available_providers.iter_mut() {
        if provider.provider_type == "anthropic" {
            provider.api_key = "test-key".to_string();
        }
    }
    assert!(config.validate().is_ok());
}

/// Test that a configured tokenizer must exist
#[test]
fn test_validate_withMissingTokenizer_shouldFail() {
    let mut config = Config::default();
    config.summarizer.tokenizer_path = Some("does/not/exist/tokenizer.json".into());
    assert!(config.validate().is_err());
}

/// Test that a zero request timeout is rejected
#[test]
fn test_validate_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.acquisition.request_timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test that the summarizer endpoint follows the backend when unset
#[test]
fn test_summarizer_get_endpoint_withEmptyEndpoint_shouldUseBackendDefault() {
    let mut config = Config::default();
    assert_eq!(config.summarizer.get_endpoint(), "https://api-inference.huggingface.co");

    config.summarizer.backend = SummaryBackend::Ollama;
    assert_eq!(config.summarizer.get_endpoint(), "http://localhost:11434");

    config.summarizer.endpoint = "http://models.internal:8080".to_string();
    assert_eq!(config.summarizer.get_endpoint(), "http://models.internal:8080");
}

/// Test provider name parsing
#[test]
fn test_translation_provider_fromStr_withMixedCase_shouldParse() {
    assert_eq!("Google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("ANTHROPIC".parse::<TranslationProvider>().unwrap(), TranslationProvider::Anthropic);
    assert!("openai".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Ollama.to_string(), "ollama");
}

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::TargetLanguage;
use crate::providers::{error_from_response, TranslationBackend};

/// Client for the public Google Translate web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, normally https://translate.googleapis.com
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    /// Pull the translated segments out of the nested array response
    ///
    /// The body looks like `[[["translated", "source", ...], ...], ..., "detected"]`.
    pub fn extract_translation(body: &Value) -> Result<String, ProviderError> {
        let segments = body.get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

        let translated: String = segments.iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() && !segments.is_empty() {
            return Err(ProviderError::ParseError("Translation segments contain no text".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint);
        debug!("Translating {} chars to '{}'", text.len(), target.code());

        let response = self.client.get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!("Google Translate error: {}", err);
            return Err(err);
        }

        let body: Value = response.json().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_translation(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::TargetLanguage;
use crate::providers::{error_from_response, GenerationParams, SummaryModel, TranslationBackend};

/// Ollama client for interacting with Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name used for every request
    model: String,
    /// System prompt template for translation, `{target_language}` is substituted
    translation_prompt: String,
    /// Sampling temperature
    temperature: f32,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens
    pub fn num_predict(mut self, num_predict: u32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).num_predict = Some(num_predict);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn from_url(url: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Ollama speaks HTTP/1.1
            .http1_only()
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            client,
            model: model.into(),
            translation_prompt: String::new(),
            temperature: 0.3,
        })
    }

    /// Set the translation prompt template and temperature
    pub fn with_translation_prompt(mut self, prompt: impl Into<String>, temperature: f32) -> Self {
        self.translation_prompt = prompt.into();
        self.temperature = temperature;
        self
    }

    /// Generate text from the Ollama API
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self.client.post(&url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!("Ollama API error: {}", err);
            return Err(err);
        }

        let response_text = response.text().await?;
        Self::parse_generation(&response_text)
    }

    /// Parse a generation body, accepting a single object or JSONL stream chunks
    fn parse_generation(response_text: &str) -> Result<GenerationResponse, ProviderError> {
        if let Ok(generated) = serde_json::from_str::<GenerationResponse>(response_text) {
            return Ok(generated);
        }

        // The server may stream even when asked not to; stitch the chunks together
        let chunks: Vec<GenerationResponse> = response_text.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str::<GenerationResponse>(line).ok())
            .collect();

        if chunks.is_empty() {
            let preview: String = response_text.chars().take(500).collect();
            error!("Failed to parse Ollama API response. Raw response (first 500 chars): {}", preview);
            return Err(ProviderError::ParseError("Unrecognised Ollama response".to_string()));
        }

        let response = chunks.iter().map(|c| c.response.as_str()).collect::<String>();
        let last = chunks.last();
        Ok(GenerationResponse {
            model: last.map(|c| c.model.clone()).unwrap_or_default(),
            response,
            done: last.is_some_and(|c| c.done),
            eval_count: last.and_then(|c| c.eval_count),
        })
    }
}

#[async_trait]
impl SummaryModel for Ollama {
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, ProviderError> {
        let request = GenerationRequest::new(&self.model, input)
            .system(format!(
                "Summarize the user's text in at most {} tokens. Reply with the summary only.",
                params.max_length
            ))
            .temperature(0.0)
            .num_predict(params.max_length as u32);

        let response = Ollama::generate(self, request).await?;
        debug!("Ollama produced {:?} tokens", response.eval_count);
        Ok(response.response.trim().to_string())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[async_trait]
impl TranslationBackend for Ollama {
    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ProviderError> {
        let system = self.translation_prompt.replace("{target_language}", target.menu_name());
        let request = GenerationRequest::new(&self.model, text)
            .system(system)
            .temperature(self.temperature);

        let response = Ollama::generate(self, request).await?;
        Ok(response.response.trim().to_string())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

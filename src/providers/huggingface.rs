use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{error_from_response, GenerationParams, SummaryModel};

/// Client for the HuggingFace Inference API summarization task
#[derive(Debug)]
pub struct HuggingFace {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the inference service
    endpoint: String,
    /// Model identifier, e.g. facebook/bart-large-cnn
    model: String,
    /// Access token, may be empty for anonymous use
    api_key: String,
}

/// Summarization request body
#[derive(Debug, Serialize)]
pub struct SummarizationRequest<'a> {
    /// Text to summarize
    inputs: &'a str,
    /// Generation parameters
    parameters: SummarizationParameters,
    /// Service options
    options: RequestOptions,
}

/// Generation parameters understood by the summarization pipeline
#[derive(Debug, Serialize)]
pub struct SummarizationParameters {
    /// Maximum output length in tokens
    max_length: usize,
    /// Beam width
    num_beams: u32,
    /// Stop when all beams are finished
    early_stopping: bool,
    /// Truncate inputs that exceed the model window
    truncation: &'static str,
}

/// Service options
#[derive(Debug, Serialize)]
pub struct RequestOptions {
    /// Block until the model is loaded instead of returning 503
    wait_for_model: bool,
}

/// One element of the summarization response array
#[derive(Debug, Deserialize)]
pub struct SummarizationOutput {
    /// The generated summary
    pub summary_text: String,
}

impl<'a> SummarizationRequest<'a> {
    /// Create a request for the given input and generation settings
    pub fn new(inputs: &'a str, params: &GenerationParams) -> Self {
        Self {
            inputs,
            parameters: SummarizationParameters {
                max_length: params.max_length,
                num_beams: params.num_beams,
                early_stopping: params.early_stopping,
                truncation: "only_first",
            },
            options: RequestOptions { wait_for_model: true },
        }
    }
}

impl HuggingFace {
    /// Create a new client
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.endpoint.trim_end_matches('/'), self.model)
    }

    /// Run the summarization task
    pub async fn summarize(&self, request: &SummarizationRequest<'_>) -> Result<Vec<SummarizationOutput>, ProviderError> {
        let mut builder = self.client.post(self.model_url()).json(request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!("HuggingFace API error: {}", err);
            return Err(err);
        }

        response.json::<Vec<SummarizationOutput>>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl SummaryModel for HuggingFace {
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, ProviderError> {
        debug!("Requesting summary from {} ({} chars)", self.model, input.len());
        let request = SummarizationRequest::new(input, params);
        let outputs = self.summarize(&request).await?;

        outputs.into_iter()
            .next()
            .map(|output| output.summary_text)
            .ok_or_else(|| ProviderError::ParseError("Empty summarization response".to_string()))
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

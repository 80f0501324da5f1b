/*!
 * Provider implementations for the remote services used by the pipeline.
 *
 * This module contains client implementations for:
 * - HuggingFace: hosted inference for the pretrained summarization model
 * - Ollama: local LLM server, usable for summarization and translation
 * - Google: web translation endpoint
 * - Anthropic: Anthropic API integration for translation
 * - Mock: deterministic in-process backends for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::language_utils::TargetLanguage;

/// Generation settings passed to a summarization backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Maximum number of generated tokens
    pub max_length: usize,
    /// Beam width for beam search
    pub num_beams: u32,
    /// Stop once every beam has finished
    pub early_stopping: bool,
}

/// A backend able to run the summarization model
///
/// Implementations receive text that has already been truncated to the
/// input token budget and must not return more than `params.max_length`
/// tokens; the summarizer clips the output again in case they do.
#[async_trait]
pub trait SummaryModel: Send + Sync + Debug {
    /// Generate a summary for the given input
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, ProviderError>;

    /// Short backend name used in logs
    fn name(&self) -> &str;
}

/// A backend able to translate text into one of the menu languages
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate the text into the target language
    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ProviderError>;

    /// Short backend name used in logs
    fn name(&self) -> &str;
}

/// Turn a non-success HTTP response into a provider error
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());

    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        code => ProviderError::ApiError { status_code: code, message },
    }
}

pub mod anthropic;
pub mod google;
pub mod huggingface;
pub mod mock;
pub mod ollama;

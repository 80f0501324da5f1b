/*!
 * Abstractive summarization with a pretrained sequence-to-sequence model.
 *
 * The input is truncated to the model's token budget before generation and
 * the decoded output is stripped of control tokens and clipped to the
 * summary budget, whatever the backend returned.
 */

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::app_config::SummarizerConfig;
use crate::errors::SummarizationError;
use crate::providers::GenerationParams;

pub mod model;
pub mod tokens;

pub use model::{shared_model, teardown_shared_model, LoadedModel};
pub use tokens::TokenBudget;

/// Pretrained news summarization model
pub const MODEL_ID: &str = "facebook/bart-large-cnn";

/// Longest input the model accepts, in tokens
pub const MAX_INPUT_TOKENS: usize = 1024;

/// Longest summary produced, in tokens
pub const MAX_SUMMARY_TOKENS: usize = 150;

/// Beam width used for generation
pub const NUM_BEAMS: u32 = 4;

/// Stop beam search as soon as every beam has finished
pub const EARLY_STOPPING: bool = true;

static CONTROL_TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?s>|<pad>|<unk>|<mask>").expect("static regex is valid"));

static INLINE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("static regex is valid"));

static LINE_EDGE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?\n ?").expect("static regex is valid"));

/// Generation settings used for every summary
pub fn generation_params() -> GenerationParams {
    GenerationParams {
        max_length: MAX_SUMMARY_TOKENS,
        num_beams: NUM_BEAMS,
        early_stopping: EARLY_STOPPING,
    }
}

/// Remove model control tokens and collapse runs of spaces
///
/// Line breaks in the model output are kept.
pub fn strip_control_tokens(raw: &str) -> String {
    let without_tokens = CONTROL_TOKENS.replace_all(raw, " ");
    let collapsed = INLINE_SPACE.replace_all(&without_tokens, " ");
    LINE_EDGE_SPACE.replace_all(&collapsed, "\n").trim().to_string()
}

/// Produces summaries using a loaded model
#[derive(Debug, Clone)]
pub struct Summarizer {
    model: Arc<LoadedModel>,
}

impl Summarizer {
    /// Create a summarizer on the process-wide model for this configuration
    pub fn new(config: &SummarizerConfig) -> Result<Self, SummarizationError> {
        Ok(Self { model: shared_model(config)? })
    }

    /// Create a summarizer on an already loaded model
    pub fn with_model(model: Arc<LoadedModel>) -> Self {
        Self { model }
    }

    /// Summarize the text
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizationError> {
        if text.trim().is_empty() {
            return Err(SummarizationError::EmptyInput);
        }

        let (input, dropped) = self.model.tokens.truncate(text, MAX_INPUT_TOKENS)?;
        if dropped > 0 {
            warn!("Input exceeds {} tokens, dropped the last {}", MAX_INPUT_TOKENS, dropped);
        }

        debug!("Generating with {} ({} chars)", self.model.backend.name(), input.len());
        let raw = self.model.backend.generate(input, &generation_params()).await?;

        let cleaned = strip_control_tokens(&raw);
        let (summary, overrun) = self.model.tokens.truncate(&cleaned, MAX_SUMMARY_TOKENS)?;
        if overrun > 0 {
            debug!("Clipped {} tokens beyond the summary budget", overrun);
        }

        let summary = summary.trim().to_string();
        info!("Summary ready ({} chars)", summary.len());
        Ok(summary)
    }
}

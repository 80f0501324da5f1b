use log::{debug, info};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::app_config::{SummarizerConfig, SummaryBackend};
use crate::errors::SummarizationError;
use crate::providers::huggingface::HuggingFace;
use crate::providers::ollama::Ollama;
use crate::providers::SummaryModel;

use super::tokens::TokenBudget;

/// A tokenizer and model backend pair, loaded once and shared
#[derive(Debug)]
pub struct LoadedModel {
    /// Token counting for the input and output budgets
    pub tokens: TokenBudget,
    /// The backend that runs generation
    pub backend: Arc<dyn SummaryModel>,
}

impl LoadedModel {
    /// Build the tokenizer and backend described by the configuration
    pub fn load(config: &SummarizerConfig) -> Result<Self, SummarizationError> {
        let tokens = TokenBudget::load(config.tokenizer_path.as_deref())?;
        let endpoint = config.get_endpoint();

        let backend: Arc<dyn SummaryModel> = match config.backend {
            SummaryBackend::HuggingFace => Arc::new(
                HuggingFace::new(&endpoint, &config.model, &config.api_key, config.timeout_secs)
                    .map_err(|e| SummarizationError::ModelLoad(e.to_string()))?,
            ),
            SummaryBackend::Ollama => Arc::new(
                Ollama::from_url(&endpoint, &config.model, config.timeout_secs)
                    .map_err(|e| SummarizationError::ModelLoad(e.to_string()))?,
            ),
        };

        info!("Loaded summarization model {} via {}", config.model, config.backend.display_name());
        Ok(Self { tokens, backend })
    }

    /// Pair an existing backend with a token budget
    pub fn from_parts(tokens: TokenBudget, backend: Arc<dyn SummaryModel>) -> Self {
        Self { tokens, backend }
    }
}

// Keyed by the configuration it was loaded from
static SHARED_MODEL: Lazy<Mutex<Option<(SummarizerConfig, Arc<LoadedModel>)>>> =
    Lazy::new(|| Mutex::new(None));

/// Get the process-wide model, loading it on first use
///
/// A later call with a different configuration replaces the cached model.
pub fn shared_model(config: &SummarizerConfig) -> Result<Arc<LoadedModel>, SummarizationError> {
    let mut slot = SHARED_MODEL.lock();

    if let Some((loaded_config, model)) = slot.as_ref() {
        if loaded_config == config {
            debug!("Reusing loaded summarization model");
            return Ok(Arc::clone(model));
        }
    }

    let model = Arc::new(LoadedModel::load(config)?);
    *slot = Some((config.clone(), Arc::clone(&model)));
    Ok(model)
}

/// Drop the process-wide model
///
/// Returns true if a model was loaded. Handles already given out stay valid.
pub fn teardown_shared_model() -> bool {
    let released = SHARED_MODEL.lock().take().is_some();
    if released {
        info!("Released summarization model");
    }
    released
}

/*!
 * Translation of summaries into one of the supported menu languages.
 *
 * The `Translator` picks a backend from the translation configuration and
 * keeps the rest of the application independent of which one is used.
 */

use log::{debug, info};
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils::TargetLanguage;
use crate::providers::anthropic::Anthropic;
use crate::providers::google::GoogleTranslate;
use crate::providers::ollama::Ollama;
use crate::providers::TranslationBackend;

/// Translates text with the configured backend
#[derive(Debug, Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
}

impl Translator {
    /// Create a translator for the active provider
    pub fn from_config(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        let backend: Arc<dyn TranslationBackend> = match config.provider {
            TranslationProvider::Google => Arc::new(GoogleTranslate::new(endpoint, timeout_secs)?),
            TranslationProvider::Ollama => Arc::new(
                Ollama::from_url(endpoint, config.get_model(), timeout_secs)?
                    .with_translation_prompt(&config.common.system_prompt, config.common.temperature),
            ),
            TranslationProvider::Anthropic => Arc::new(
                Anthropic::new(config.get_api_key(), endpoint, config.get_model(), timeout_secs)?
                    .with_translation_prompt(&config.common.system_prompt, config.common.temperature),
            ),
        };

        info!("Translation provider: {}", config.provider.display_name());
        Ok(Self { backend })
    }

    /// Create a translator on an existing backend
    pub fn with_backend(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Translate the text into the target language
    pub async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        debug!("Translating {} chars to {} via {}", text.len(), target, self.backend.name());
        let translated = self.backend.translate(text, target).await?;
        Ok(translated)
    }

    /// Translate into a language given by its menu name or code
    pub async fn translate_to(&self, text: &str, language: &str) -> Result<String, TranslationError> {
        let target = TargetLanguage::from_menu_name(language)?;
        self.translate(text, target).await
    }
}

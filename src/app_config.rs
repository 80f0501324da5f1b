use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Settings read from `summarist.json`
///
/// Every section falls back to defaults, so a partial file is valid.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Content acquisition settings
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Summarization model settings
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Translation backend settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for fetching webpages and reading PDFs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AcquisitionConfig {
    /// Timeout for webpage requests in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent sent with webpage requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Skip blank PDF pages instead of failing the whole document
    #[serde(default)]
    pub skip_empty_pdf_pages: bool,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            skip_empty_pdf_pages: false,
        }
    }
}

/// Summarization backend type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryBackend {
    // @backend: HuggingFace Inference API
    #[default]
    HuggingFace,
    // @backend: Ollama
    Ollama,
}

impl SummaryBackend {
    // @returns: Capitalized backend name
    pub fn display_name(&self) -> &str {
        match self {
            Self::HuggingFace => "HuggingFace",
            Self::Ollama => "Ollama",
        }
    }
}

/// Summarization model configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummarizerConfig {
    /// Which backend runs the model
    #[serde(default)]
    pub backend: SummaryBackend,

    /// Model identifier
    #[serde(default = "default_summary_model")]
    pub model: String,

    /// Service URL, empty for the backend default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// API key (HuggingFace access token)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Path to a pretrained tokenizer.json used for token budgets
    #[serde(default)]
    pub tokenizer_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            backend: SummaryBackend::default(),
            model: default_summary_model(),
            endpoint: String::new(),
            api_key: String::new(),
            tokenizer_path: None,
            timeout_secs: default_model_timeout_secs(),
        }
    }
}

impl SummarizerConfig {
    /// Get the endpoint, falling back to the backend default
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        match self.backend {
            SummaryBackend::HuggingFace => default_huggingface_endpoint(),
            SummaryBackend::Ollama => default_ollama_endpoint(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate web endpoint
    #[default]
    Google,
    // @provider: Ollama
    Ollama,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google",
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Per-provider overrides for translation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_model_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_model_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Settings shared by the LLM translation providers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationCommonConfig {
    /// System prompt template for translation
    /// Placeholder: {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_model_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.3
}

fn default_user_agent() -> String {
    concat!("summarist/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_summary_model() -> String {
    crate::summarization::MODEL_ID.to_string()
}

fn default_huggingface_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the following text to {target_language}. Preserve the original meaning and tone, and reply with the translation only.".to_string()
}

impl Config {
    /// Load the configuration from a JSON file, or write a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        crate::file_utils::FileManager::write_to_file(path, &config_json)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_menu()?;

        if self.summarizer.model.trim().is_empty() {
            return Err(anyhow!("Summarizer model identifier must not be empty"));
        }
        url::Url::parse(&self.summarizer.get_endpoint())
            .with_context(|| format!("Invalid summarizer endpoint: {}", self.summarizer.get_endpoint()))?;

        if let Some(tokenizer_path) = &self.summarizer.tokenizer_path {
            if !tokenizer_path.is_file() {
                return Err(anyhow!("Tokenizer file not found: {:?}", tokenizer_path));
            }
        }

        url::Url::parse(&self.translation.get_endpoint())
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.get_endpoint()))?;

        if self.translation.provider == TranslationProvider::Anthropic
            && self.translation.get_api_key().is_empty()
        {
            return Err(anyhow!("Translation API key is required for Anthropic provider"));
        }

        if self.acquisition.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        Ok(())
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::Google => String::new(),
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Google),
                ProviderConfig::new(TranslationProvider::Ollama),
                ProviderConfig::new(TranslationProvider::Anthropic),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}

/*!
 * Error types for the summarist application.
 *
 * Each pipeline stage has its own error enum so that the session layer can
 * tell an acquisition failure from a model failure without inspecting
 * message text. All of them are built with the thiserror crate.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Fixed message shown when a webpage answers with anything but 200 OK
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch the webpage.";

/// Fixed message shown when a save is requested before any summary exists
pub const NOTHING_TO_SAVE_MESSAGE: &str = "Please generate a summary first.";

/// Errors that can occur when working with remote backends
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while turning a source into plain text
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP request itself failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a status other than 200
    #[error("{}", FETCH_FAILED_MESSAGE)]
    HttpStatus { status_code: u16 },

    /// The PDF could not be opened or parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// A PDF page produced no extractable text
    #[error("PDF page {page} contains no extractable text")]
    EmptyPage { page: u32 },

    /// The whole document produced no extractable text
    #[error("No extractable text found in {0:?}")]
    NoText(PathBuf),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while generating a summary
#[derive(Error, Debug)]
pub enum SummarizationError {
    /// Nothing to summarize
    #[error("Input text is empty")]
    EmptyInput,

    /// Tokenizer could not be loaded or failed to encode
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// The model handle could not be created
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// Error from the model backend
    #[error("Model backend error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Nothing to translate
    #[error("Text to translate is empty")]
    EmptyInput,

    /// The language is not in the supported menu
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur while saving a summary
#[derive(Error, Debug)]
pub enum ExportError {
    /// No summary has been produced yet
    #[error("{}", NOTHING_TO_SAVE_MESSAGE)]
    NothingToSave,

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF document could not be built
    #[error("PDF export error: {0}")]
    Pdf(String),
}

/// Errors from the background task runner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// Another task holds the single worker slot
    #[error("A task is already running, wait for it to finish")]
    Busy,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from content acquisition
    #[error("Acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Error from summarization
    #[error("Summarization error: {0}")]
    Summarization(#[from] SummarizationError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from saving
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A task was rejected because another one is running
    #[error("{0}")]
    Runner(#[from] RunnerError),

    /// Input was missing, holds the prompt shown to the user
    #[error("{0}")]
    MissingInput(&'static str),

    /// A background task finished with a failure message
    #[error("{0}")]
    TaskFailed(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

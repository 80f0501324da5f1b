/*!
 * Content acquisition: turn a source selector into plain text.
 *
 * The three strategies share nothing but the signature:
 * - `web`: HTTP GET and paragraph text extraction
 * - `pdf`: per-page text extraction in page order
 * - raw text is passed through unchanged
 */

use log::{debug, info};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::AcquisitionConfig;
use crate::errors::AcquisitionError;

pub mod pdf;
pub mod web;

/// Where the text to summarize comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelector {
    /// A webpage to fetch
    Url(String),
    /// Text supplied directly by the user
    Text(String),
    /// A PDF file on disk
    Pdf(PathBuf),
}

impl SourceSelector {
    /// Short label for logs and progress messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "URL",
            Self::Text(_) => "text",
            Self::Pdf(_) => "PDF",
        }
    }

    /// True when the user supplied nothing usable
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Url(url) => url.trim().is_empty(),
            Self::Text(text) => text.trim().is_empty(),
            Self::Pdf(path) => path.as_os_str().is_empty(),
        }
    }
}

impl fmt::Display for SourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "URL {}", url),
            Self::Text(text) => write!(f, "text ({} chars)", text.chars().count()),
            Self::Pdf(path) => write!(f, "PDF {:?}", path),
        }
    }
}

/// Produces plain text from a source selector
#[derive(Debug, Clone)]
pub struct ContentAcquirer {
    /// HTTP client shared by every URL acquisition
    client: Client,
    /// Acquisition settings
    config: AcquisitionConfig,
}

impl ContentAcquirer {
    /// Create an acquirer from configuration
    pub fn new(config: AcquisitionConfig) -> Result<Self, AcquisitionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AcquisitionError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Acquire the text behind a selector
    pub async fn acquire(&self, selector: &SourceSelector) -> Result<String, AcquisitionError> {
        debug!("Acquiring {}", selector);

        let text = match selector {
            SourceSelector::Url(url) => web::fetch_paragraph_text(&self.client, url).await?,
            SourceSelector::Text(text) => text.clone(),
            SourceSelector::Pdf(path) => {
                let path = path.clone();
                let skip_empty = self.config.skip_empty_pdf_pages;
                tokio::task::spawn_blocking(move || pdf::extract_text(&path, skip_empty))
                    .await
                    .map_err(|e| AcquisitionError::Pdf(format!("PDF worker failed: {}", e)))??
            }
        };

        info!("Acquired {} chars from {}", text.len(), selector.kind());
        Ok(text)
    }
}

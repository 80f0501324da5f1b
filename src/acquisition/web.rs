use log::{debug, warn};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use url::Url;

use crate::errors::AcquisitionError;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("static selector is valid"));

/// Check that the URL parses and uses http or https
pub fn parse_url(raw: &str) -> Result<Url, AcquisitionError> {
    let url = Url::parse(raw.trim()).map_err(|e| AcquisitionError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AcquisitionError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// Fetch a webpage and return the text of its paragraphs
///
/// Anything other than 200 OK is reported as `HttpStatus`, whose message is
/// the fixed "Failed to fetch the webpage." text.
pub async fn fetch_paragraph_text(client: &Client, raw_url: &str) -> Result<String, AcquisitionError> {
    let url = parse_url(raw_url)?;

    let response = client.get(url.clone())
        .send()
        .await
        .map_err(|e| AcquisitionError::Request(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!("GET {} returned {}", url, status);
        return Err(AcquisitionError::HttpStatus { status_code: status.as_u16() });
    }

    let body = response.text()
        .await
        .map_err(|e| AcquisitionError::Request(e.to_string()))?;
    debug!("Fetched {} bytes from {}", body.len(), url);

    Ok(paragraph_text(&body))
}

/// Join the text content of every `<p>` element with single spaces, in document order
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.select(&PARAGRAPH)
        .map(|paragraph| paragraph.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

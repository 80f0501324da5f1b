use log::{debug, warn};
use lopdf::Document;
use std::path::Path;

use crate::errors::AcquisitionError;

/// Extract text per page, in page order, concatenated with no separator
///
/// A page with no extractable text aborts the extraction unless
/// `skip_empty_pages` is set, in which case it is skipped and only a
/// document with no text at all is an error.
pub fn extract_text(path: &Path, skip_empty_pages: bool) -> Result<String, AcquisitionError> {
    if !path.is_file() {
        return Err(AcquisitionError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("PDF file not found: {:?}", path),
        )));
    }

    let doc = Document::load(path)
        .map_err(|e| AcquisitionError::Pdf(format!("Failed to load {:?}: {}", path, e)))?;

    let pages = doc.get_pages();
    debug!("{:?} has {} pages", path, pages.len());

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = doc.extract_text(&[*page_number])
            .map_err(|e| AcquisitionError::Pdf(format!("Failed to extract page {}: {}", page_number, e)))?;

        if page_text.trim().is_empty() {
            if skip_empty_pages {
                warn!("Skipping page {} of {:?}: no extractable text", page_number, path);
                continue;
            }
            return Err(AcquisitionError::EmptyPage { page: *page_number });
        }

        text.push_str(&page_text);
    }

    if text.trim().is_empty() {
        return Err(AcquisitionError::NoText(path.to_path_buf()));
    }

    Ok(text)
}

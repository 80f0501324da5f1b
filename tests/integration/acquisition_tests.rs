/*!
 * Integration tests for content acquisition from URLs, text and PDFs
 */

use anyhow::Result;
use summarist::acquisition::{ContentAcquirer, SourceSelector};
use summarist::app_config::AcquisitionConfig;
use summarist::errors::{AcquisitionError, FETCH_FAILED_MESSAGE};
use crate::common;
use crate::common::mock_server::{MockResponse, MockServer};

fn acquirer(skip_empty_pdf_pages: bool) -> ContentAcquirer {
    ContentAcquirer::new(AcquisitionConfig {
        request_timeout_secs: 5,
        skip_empty_pdf_pages,
        ..AcquisitionConfig::default()
    })
    .expect("acquirer should build")
}

/// Test that paragraph texts are joined with single spaces in document order
#[tokio::test]
async fn test_acquire_url_withParagraphs_shouldJoinInOrder() -> Result<()> {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::html(
        "<html><head><title>Ignored</title></head><body>\
         <nav>Menu</nav>\
         <p>First paragraph.</p>\
         <article><p>Second <em>emphasised</em> paragraph.</p></article>\
         <p>Third paragraph.</p>\
         </body></html>",
    )).await;

    let text = acquirer(false).acquire(&SourceSelector::Url(server.url("/news/story"))).await?;

    assert_eq!(text, "First paragraph. Second emphasised paragraph. Third paragraph.");
    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/news/story");
    assert!(requests[0].header("user-agent").unwrap_or_default().starts_with("summarist/"));
    Ok(())
}

/// Test that a non-200 answer yields the fixed failure message
#[tokio::test]
async fn test_acquire_url_withNotFound_shouldReturnFetchFailure() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::status(404, "missing")).await;

    let result = acquirer(false).acquire(&SourceSelector::Url(server.url("/gone"))).await;

    match result {
        Err(error @ AcquisitionError::HttpStatus { status_code: 404 }) => {
            assert_eq!(error.to_string(), FETCH_FAILED_MESSAGE);
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

/// Test that any success status other than 200 still counts as a failure
#[tokio::test]
async fn test_acquire_url_withNoContent_shouldReturnFetchFailure() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::status(204, "")).await;

    let result = acquirer(false).acquire(&SourceSelector::Url(server.url("/empty"))).await;

    assert!(matches!(result, Err(AcquisitionError::HttpStatus { status_code: 204 })));
}

/// Test that invalid URLs fail before any request
#[tokio::test]
async fn test_acquire_url_withInvalidUrl_shouldFailFast() {
    let result = acquirer(false).acquire(&SourceSelector::Url("example dot com".to_string())).await;
    assert!(matches!(result, Err(AcquisitionError::InvalidUrl { .. })));
}

/// Test that raw text passes through unchanged
#[tokio::test]
async fn test_acquire_text_withAnyText_shouldReturnIdentity() -> Result<()> {
    let input = "  Line one.\nLine two, unchanged.  ";
    let text = acquirer(false).acquire(&SourceSelector::Text(input.to_string())).await?;
    assert_eq!(text, input);
    Ok(())
}

/// Test that PDF pages are concatenated in page order with no separator
#[tokio::test]
async fn test_acquire_pdf_withThreePages_shouldConcatenateInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("report.pdf");
    common::write_test_pdf(&path, &["Alpha page text", "Beta page text", "Gamma page text"])?;

    let text = acquirer(false).acquire(&SourceSelector::Pdf(path.clone())).await?;

    assert_eq!(text, common::lopdf_page_texts(&path)?.concat());
    let alpha = text.find("Alpha").expect("first page text");
    let beta = text.find("Beta").expect("second page text");
    let gamma = text.find("Gamma").expect("third page text");
    assert!(alpha < beta && beta < gamma);
    Ok(())
}

/// Test that a page without text aborts extraction by default
#[tokio::test]
async fn test_acquire_pdf_withEmptyPage_shouldFailNamingPage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("gap.pdf");
    common::write_test_pdf(&path, &["Alpha page text", "", "Gamma page text"])?;

    let result = acquirer(false).acquire(&SourceSelector::Pdf(path)).await;

    assert!(matches!(result, Err(AcquisitionError::EmptyPage { page: 2 })));
    Ok(())
}

/// Test that empty pages are skipped when configured
#[tokio::test]
async fn test_acquire_pdf_withSkipEmptyPages_shouldKeepOtherPages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("gap.pdf");
    common::write_test_pdf(&path, &["Alpha page text", "", "Gamma page text"])?;

    let text = acquirer(true).acquire(&SourceSelector::Pdf(path)).await?;

    assert!(text.contains("Alpha page text"));
    assert!(text.contains("Gamma page text"));
    assert!(text.find("Alpha") < text.find("Gamma"));
    Ok(())
}

/// Test that a document with no text at all fails even when skipping
#[tokio::test]
async fn test_acquire_pdf_withOnlyEmptyPages_shouldReturnNoText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("blank.pdf");
    common::write_test_pdf(&path, &["", ""])?;

    let result = acquirer(true).acquire(&SourceSelector::Pdf(path)).await;

    assert!(matches!(result, Err(AcquisitionError::NoText(_))));
    Ok(())
}

/// Test that a missing PDF is an IO error
#[tokio::test]
async fn test_acquire_pdf_withMissingFile_shouldReturnIoError() {
    let result = acquirer(false).acquire(&SourceSelector::Pdf("no/such/file.pdf".into())).await;
    assert!(matches!(result, Err(AcquisitionError::Io(_))));
}

/// Test that a file that is not a PDF reports a PDF error
#[tokio::test]
async fn test_acquire_pdf_withGarbageFile_shouldReturnPdfError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "fake.pdf", "this is not a pdf")?;

    let result = acquirer(false).acquire(&SourceSelector::Pdf(path)).await;

    assert!(matches!(result, Err(AcquisitionError::Pdf(_))));
    Ok(())
}

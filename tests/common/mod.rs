/*!
 * Common test utilities for the summarist test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use summarist::acquisition::ContentAcquirer;
use summarist::app_config::{AcquisitionConfig, Config};
use summarist::app_controller::Controller;
use summarist::providers::{SummaryModel, TranslationBackend};
use summarist::summarization::{LoadedModel, Summarizer, TokenBudget};
use summarist::task_runner::{ProgressSink, TaskRunner};
use summarist::translation::Translator;

pub mod mock_server;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Space-separated words "w0 w1 ... w{count-1}"
pub fn numbered_words(count: usize) -> String {
    (0..count).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}

/// Writes a word-level tokenizer.json that splits on whitespace and punctuation
pub fn write_word_level_tokenizer(dir: &Path) -> Result<PathBuf> {
    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": "<unk>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {
            "type": "Whitespace"
        },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {
                "<unk>": 0,
                "the": 1,
                "cat": 2,
                "sat": 3
            },
            "unk_token": "<unk>"
        }
    });

    let path = dir.join("tokenizer.json");
    fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)?;
    Ok(path)
}

/// Writes a PDF with one page per entry; an empty entry produces a page without text
pub fn write_test_pdf(path: &Path, pages: &[&str]) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, Content { operations }.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    }));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path)?;
    Ok(())
}

/// What lopdf itself extracts from each page of a document, in page order
pub fn lopdf_page_texts(path: &Path) -> Result<Vec<String>> {
    let doc = Document::load(path)?;
    let mut texts = Vec::new();
    for page_number in doc.get_pages().keys() {
        texts.push(doc.extract_text(&[*page_number])?);
    }
    Ok(texts)
}

/// Progress events seen by a recording sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Busy(String),
    Idle,
}

/// Progress sink that records every notification
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn busy(&self, label: &str) {
        self.events.lock().push(ProgressEvent::Busy(label.to_string()));
    }

    fn idle(&self) {
        self.events.lock().push(ProgressEvent::Idle);
    }
}

/// Send library logs to the captured test output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Summarizer over a backend, counting tokens by whitespace
pub fn summarizer_with(backend: Arc<dyn SummaryModel>) -> Summarizer {
    Summarizer::with_model(Arc::new(LoadedModel::from_parts(TokenBudget::Whitespace, backend)))
}

/// Controller assembled from test backends, without touching the shared model
pub fn controller_with(
    model: Arc<dyn SummaryModel>,
    translator: Arc<dyn TranslationBackend>,
    progress: Arc<dyn ProgressSink>,
) -> Result<Controller> {
    let config = Config::default();
    let acquirer = ContentAcquirer::new(AcquisitionConfig {
        request_timeout_secs: 5,
        ..AcquisitionConfig::default()
    })?;

    Ok(Controller::with_components(
        config,
        acquirer,
        summarizer_with(model),
        Translator::with_backend(translator),
        TaskRunner::new(progress),
    ))
}

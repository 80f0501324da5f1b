/*!
 * Mock backend implementations for testing.
 *
 * These backends never touch the network:
 * - `MockSummaryModel::working()` - returns the first words of its input
 * - `MockSummaryModel::verbose()` - ignores the length limit on purpose
 * - `MockTranslator::working()` - tags the text with the target code
 * - `failing()` on either - always returns an error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::language_utils::TargetLanguage;
use crate::providers::{GenerationParams, SummaryModel, TranslationBackend};

/// Behavior mode for the mock backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Succeeds but returns far more tokens than requested, wrapped in control tokens
    Verbose,
    /// Always fails with an error
    Failing,
    /// Simulates a slow response
    Slow { delay_ms: u64 },
}

fn simulated_failure() -> ProviderError {
    ProviderError::ApiError {
        message: "Simulated provider failure".to_string(),
        status_code: 500,
    }
}

/// Mock summarization model
#[derive(Debug, Clone)]
pub struct MockSummaryModel {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of generate calls
    request_count: Arc<AtomicUsize>,
    /// Every input received, in order
    inputs: Arc<Mutex<Vec<String>>>,
}

impl MockSummaryModel {
    /// Create a new mock model with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock model
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock model that overruns the length limit
    pub fn verbose() -> Self {
        Self::new(MockBehavior::Verbose)
    }

    /// Create a failing mock model
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock model that sleeps before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of generate calls so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Inputs received so far
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }

    fn first_words(input: &str, count: usize) -> String {
        input.split_whitespace().take(count).collect::<Vec<_>>().join(" ")
    }
}

#[async_trait]
impl SummaryModel for MockSummaryModel {
    async fn generate(&self, input: &str, params: &GenerationParams) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().push(input.to_string());

        match self.behavior {
            MockBehavior::Working => Ok(Self::first_words(input, params.max_length.min(12))),
            MockBehavior::Verbose => {
                let words = (0..params.max_length * 2)
                    .map(|i| format!("word{}", i))
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(format!("<s>{}</s><pad>", words))
            }
            MockBehavior::Failing => Err(simulated_failure()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::first_words(input, params.max_length.min(12)))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock translation backend
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Every language code received, in order
    codes: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            codes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock translator
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Language codes received so far
    pub fn received_codes(&self) -> Vec<String> {
        self.codes.lock().clone()
    }
}

#[async_trait]
impl TranslationBackend for MockTranslator {
    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ProviderError> {
        self.codes.lock().push(target.code().to_string());

        match self.behavior {
            MockBehavior::Failing => Err(simulated_failure()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(format!("[{}] {}", target.code(), text))
            }
            MockBehavior::Working | MockBehavior::Verbose => Ok(format!("[{}] {}", target.code(), text)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

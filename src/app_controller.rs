use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::acquisition::{ContentAcquirer, SourceSelector};
use crate::app_config::Config;
use crate::errors::{AcquisitionError, AppError, ExportError, RunnerError};
use crate::export::{export_summary, ExportFormat};
use crate::language_utils::TargetLanguage;
use crate::summarization::{teardown_shared_model, Summarizer};
use crate::task_runner::{ProgressSink, TaskHandle, TaskOutcome, TaskRunner};
use crate::translation::Translator;

// @module: Session controller wiring user actions to the pipeline

pub const PROMPT_URL: &str = "Please enter a URL.";
pub const PROMPT_TEXT: &str = "Please enter text.";
pub const PROMPT_PDF: &str = "Please select a PDF file.";
pub const PROMPT_NO_SUMMARY: &str = "No summary to translate.";

/// What the user currently sees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    // @field: Last successful summary or translation
    pub summary: Option<String>,
    // @field: Outcome of the most recent task
    pub outcome: Option<TaskOutcome>,
}

impl DisplayState {
    // Failures are shown but never replace the stored summary
    fn record(&mut self, outcome: TaskOutcome) {
        if let TaskOutcome::Success(text) = &outcome {
            self.summary = Some(text.clone());
        }
        self.outcome = Some(outcome);
    }
}

/// Result of asking the controller to start work
#[derive(Debug)]
pub enum Submission {
    /// Work is running in the background
    Started(TaskHandle),
    /// Input was missing; nothing was started
    Prompt(&'static str),
}

impl Submission {
    /// Wait for the task if one was started, returning the prompt otherwise
    pub async fn wait(self) -> Option<&'static str> {
        match self {
            Self::Started(handle) => {
                handle.wait().await;
                None
            }
            Self::Prompt(message) => Some(message),
        }
    }
}

/// Follow-up steps for a one-shot run
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub translate: Option<TargetLanguage>,
    pub save: Option<PathBuf>,
    // @field: Inferred from the save path when unset
    pub format: Option<ExportFormat>,
}

/// What a one-shot run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub summary: String,
    pub translation: Option<String>,
    pub saved: Option<PathBuf>,
}

fn acquisition_failure(error: &AcquisitionError) -> TaskOutcome {
    match error {
        AcquisitionError::HttpStatus { .. } => TaskOutcome::Failure(error.to_string()),
        other => TaskOutcome::Failure(format!("An error occurred: {}", other)),
    }
}

/// Main application controller for a summarization session
pub struct Controller {
    // @field: App configuration
    config: Config,
    acquirer: ContentAcquirer,
    summarizer: Summarizer,
    translator: Translator,
    runner: TaskRunner,
    state: Arc<Mutex<DisplayState>>,
}

impl Controller {
    // @method: Create a controller from configuration, loading the shared model
    pub fn with_config(config: Config, progress: Arc<dyn ProgressSink>) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let acquirer = ContentAcquirer::new(config.acquisition.clone())
            .context("Failed to create content acquirer")?;
        let summarizer = Summarizer::new(&config.summarizer)
            .context("Failed to load summarization model")?;
        let translator = Translator::from_config(&config.translation)
            .context("Failed to create translator")?;

        Ok(Self::with_components(config, acquirer, summarizer, translator, TaskRunner::new(progress)))
    }

    /// Assemble a controller from prebuilt parts
    pub fn with_components(
        config: Config,
        acquirer: ContentAcquirer,
        summarizer: Summarizer,
        translator: Translator,
        runner: TaskRunner,
    ) -> Self {
        Self {
            config,
            acquirer,
            summarizer,
            translator,
            runner,
            state: Arc::new(Mutex::new(DisplayState::default())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True while a background task is running
    pub fn is_busy(&self) -> bool {
        self.runner.is_busy()
    }

    /// Snapshot of the display state
    pub fn display(&self) -> DisplayState {
        self.state.lock().clone()
    }

    /// The summary a save or translation would use
    pub fn current_summary(&self) -> Option<String> {
        self.state.lock().summary.clone()
    }

    /// Outcome of the most recently finished task
    pub fn last_outcome(&self) -> Option<TaskOutcome> {
        self.state.lock().outcome.clone()
    }

    fn submit<F>(&self, label: String, operation: F) -> Result<Submission, RunnerError>
    where
        F: std::future::Future<Output = TaskOutcome> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let handle = self.runner.submit(label, operation, move |outcome| {
            state.lock().record(outcome);
        })?;
        Ok(Submission::Started(handle))
    }

    /// Acquire the source and summarize it in the background
    pub fn summarize(&self, selector: SourceSelector) -> Result<Submission, RunnerError> {
        if selector.is_blank() {
            let prompt = match selector {
                SourceSelector::Url(_) => PROMPT_URL,
                SourceSelector::Text(_) => PROMPT_TEXT,
                SourceSelector::Pdf(_) => PROMPT_PDF,
            };
            debug!("No input for {}: {}", selector.kind(), prompt);
            return Ok(Submission::Prompt(prompt));
        }

        let acquirer = self.acquirer.clone();
        let summarizer = self.summarizer.clone();
        let label = format!("Summarizing {}...", selector.kind());

        self.submit(label, async move {
            let text = match acquirer.acquire(&selector).await {
                Ok(text) => text,
                Err(e) => return acquisition_failure(&e),
            };

            match summarizer.summarize(&text).await {
                Ok(summary) => TaskOutcome::Success(summary),
                Err(e) => TaskOutcome::Failure(format!("An error occurred: {}", e)),
            }
        })
    }

    /// Translate the stored summary in the background
    ///
    /// On success the translation becomes the stored summary.
    pub fn translate(&self, target: TargetLanguage) -> Result<Submission, RunnerError> {
        let Some(summary) = self.current_summary() else {
            return Ok(Submission::Prompt(PROMPT_NO_SUMMARY));
        };

        let translator = self.translator.clone();
        let label = format!("Translating to {}...", target);

        self.submit(label, async move {
            match translator.translate(&summary, target).await {
                Ok(translated) => TaskOutcome::Success(translated),
                Err(e) => TaskOutcome::Failure(format!("An error occurred: {}", e)),
            }
        })
    }

    /// Save the stored summary
    pub fn download<P: AsRef<Path>>(&self, path: P, format: Option<ExportFormat>) -> Result<PathBuf, ExportError> {
        let summary = self.current_summary().ok_or(ExportError::NothingToSave)?;
        let path = path.as_ref();

        export_summary(&summary, path, format)?;
        Ok(path.to_path_buf())
    }

    // Wait for a submission and turn its outcome into a result
    async fn finish(&self, submission: Submission) -> Result<String, AppError> {
        if let Some(prompt) = submission.wait().await {
            return Err(AppError::MissingInput(prompt));
        }

        match self.last_outcome() {
            Some(TaskOutcome::Success(text)) => Ok(text),
            Some(TaskOutcome::Failure(message)) => Err(AppError::TaskFailed(message)),
            None => Err(AppError::TaskFailed("Task finished without a result".to_string())),
        }
    }

    /// Summarize one source, then translate and save it as requested
    ///
    /// Each step waits for the previous one. The first failure stops the run.
    pub async fn run_pipeline(&self, selector: SourceSelector, options: &PipelineOptions) -> Result<PipelineReport, AppError> {
        let summary = self.finish(self.summarize(selector)?).await?;

        let translation = match options.translate {
            Some(language) => Some(self.finish(self.translate(language)?).await?),
            None => None,
        };

        let saved = match &options.save {
            Some(path) => Some(self.download(path, options.format)?),
            None => None,
        };

        Ok(PipelineReport { summary, translation, saved })
    }

    /// Release the shared model
    pub fn shutdown(&self) {
        if teardown_shared_model() {
            info!("Session closed");
        }
    }
}

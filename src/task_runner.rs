/*!
 * Background execution of long-running operations.
 *
 * The runner owns a single worker slot. A submission while the slot is taken
 * is rejected rather than queued, so at most one acquisition, summary or
 * translation is in flight and its result cannot be overwritten by another.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, warn};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::errors::RunnerError;

/// Message reported when an operation panics
pub const PANIC_MESSAGE: &str = "An error occurred: task panicked";

/// Result of a background operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The operation produced a displayable value
    Success(String),
    /// The operation failed; the message is meant for the user
    Failure(String),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The text to show, whichever way the operation went
    pub fn message(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives busy/idle notifications from the runner
pub trait ProgressSink: Send + Sync {
    /// A task started
    fn busy(&self, label: &str);

    /// The task finished
    fn idle(&self);
}

/// Progress sink that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn busy(&self, _label: &str) {}

    fn idle(&self) {}
}

/// Indeterminate terminal spinner
#[derive(Default)]
pub struct SpinnerProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for SpinnerProgress {
    fn busy(&self, label: &str) {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self.bar.lock().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn idle(&self) {
        if let Some(bar) = self.bar.lock().take() {
            bar.finish_and_clear();
        }
    }
}

// Frees the worker slot when the task ends, even by unwinding
struct SlotGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Handle to a submitted task
#[derive(Debug)]
pub struct TaskHandle {
    id: Uuid,
    label: String,
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait until the completion callback has run and the slot is free
    pub async fn wait(self) {
        if let Err(e) = self.join.await {
            error!("Task {} ({}) did not complete cleanly: {}", self.id, self.label, e);
        }
    }
}

/// Single-slot background task runner
#[derive(Clone)]
pub struct TaskRunner {
    busy: Arc<AtomicBool>,
    progress: Arc<dyn ProgressSink>,
}

impl fmt::Debug for TaskRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRunner")
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new(Arc::new(NoProgress))
    }
}

impl TaskRunner {
    /// Create an idle runner reporting to the given progress sink
    pub fn new(progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            progress,
        }
    }

    /// True while a task holds the slot
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Run `operation` in the background and hand its outcome to `on_complete`
    ///
    /// Must be called from within a tokio runtime. The callback runs exactly
    /// once, and the slot is released only after it returns.
    pub fn submit<F, C>(&self, label: impl Into<String>, operation: F, on_complete: C) -> Result<TaskHandle, RunnerError>
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
        C: FnOnce(TaskOutcome) + Send + 'static,
    {
        let label = label.into();

        if self.busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            warn!("Rejected '{}': a task is already running", label);
            return Err(RunnerError::Busy);
        }

        let guard = SlotGuard { busy: Arc::clone(&self.busy) };
        let id = Uuid::new_v4();
        let progress = Arc::clone(&self.progress);

        progress.busy(&label);
        debug!("Task {} started: {}", id, label);

        let task_label = label.clone();
        let join = tokio::spawn(async move {
            let _guard = guard;

            let outcome = match tokio::spawn(operation).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_panic() => {
                    error!("Task {} ({}) panicked", id, task_label);
                    TaskOutcome::Failure(PANIC_MESSAGE.to_string())
                }
                Err(e) => TaskOutcome::Failure(format!("An error occurred: {}", e)),
            };

            progress.idle();
            debug!("Task {} finished: {}", id, if outcome.is_success() { "success" } else { "failure" });
            on_complete(outcome);
        });

        Ok(TaskHandle { id, label, join })
    }
}

//! Single-flight run trigger shared by the HTTP route and the scheduler.

use std::sync::Arc;
use std::time::Instant;

use shelfsort_core::{run_all, Collaborators, MerchSources, RunError, RunSettings, RunSummary};
use tokio::sync::Mutex;

/// Why a trigger did not produce a summary.
#[derive(Debug)]
pub enum TriggerError {
    /// Another run holds the guard.
    InProgress,
    Run(RunError),
    /// The run task panicked or was cancelled by the runtime.
    Task(String),
}

/// Owns the platform client and run settings, and makes sure at most one
/// run executes per process.
#[derive(Clone)]
pub struct RunCoordinator {
    sources: Arc<dyn MerchSources>,
    settings: Arc<RunSettings>,
    pub(crate) guard: Arc<Mutex<()>>,
}

impl RunCoordinator {
    #[must_use]
    pub fn new(sources: Arc<dyn MerchSources>, settings: Arc<RunSettings>) -> Self {
        Self {
            sources,
            settings,
            guard: Arc::new(Mutex::new(())),
        }
    }

    /// Runs every configured collection unless a run is already going.
    ///
    /// The run executes on its own task holding the guard, so dropping the
    /// returned future (a disconnected HTTP caller) does not cut a run short.
    /// `trigger` names the caller in logs (`"http"`, `"schedule"`).
    pub async fn try_run(&self, trigger: &'static str) -> Result<RunSummary, TriggerError> {
        let Ok(held) = Arc::clone(&self.guard).try_lock_owned() else {
            tracing::warn!(trigger, "run already in progress, trigger ignored");
            return Err(TriggerError::InProgress);
        };

        let sources = Arc::clone(&self.sources);
        let settings = Arc::clone(&self.settings);
        let task = tokio::spawn(async move {
            let _held = held;
            execute(sources.as_ref(), &settings, trigger).await
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(trigger, error = %e, "run task failed");
                Err(TriggerError::Task(e.to_string()))
            }
        }
    }
}

async fn execute(
    sources: &dyn MerchSources,
    settings: &RunSettings,
    trigger: &'static str,
) -> Result<RunSummary, TriggerError> {
    let started = Instant::now();
    let collaborators = Collaborators::from_sources(sources);
    match run_all(collaborators, settings).await {
        Ok(summary) => {
            tracing::info!(
                trigger,
                success = summary.success,
                reordered = summary.results.len(),
                failed = summary.failures.len(),
                unique_products = summary.unique_products,
                unique_groups = summary.unique_groups,
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "run finished"
            );
            Ok(summary)
        }
        Err(e) => {
            tracing::error!(trigger, error = %e, "run aborted");
            Err(TriggerError::Run(e))
        }
    }
}

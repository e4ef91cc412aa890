//! Background job scheduler.
//!
//! Registers the optional recurring collection sort run. Scheduled runs go
//! through the same [`RunCoordinator`] as the HTTP route, so a scheduled
//! tick that overlaps a manual trigger is skipped.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::runs::{RunCoordinator, TriggerError};

/// Builds and starts the scheduler with one job on `schedule` (6-field cron).
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the expression does not parse or the
/// scheduler cannot be initialised or started.
pub async fn build_scheduler(
    schedule: &str,
    runner: RunCoordinator,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let runner = runner.clone();
        Box::pin(async move {
            tracing::info!("scheduler: starting collection sort run");
            match runner.try_run("schedule").await {
                Ok(summary) if summary.success => {
                    tracing::info!("scheduler: collection sort run complete");
                }
                Ok(summary) => {
                    tracing::warn!(
                        failed = summary.failures.len(),
                        "scheduler: collection sort run finished with failures"
                    );
                }
                Err(TriggerError::InProgress) => {
                    tracing::info!("scheduler: skipped, another run is in progress");
                }
                Err(TriggerError::Run(e)) => {
                    tracing::error!(error = %e, "scheduler: collection sort run aborted");
                }
                Err(TriggerError::Task(e)) => {
                    tracing::error!(error = %e, "scheduler: collection sort task failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(schedule, "scheduled collection sort registered");
    Ok(scheduler)
}

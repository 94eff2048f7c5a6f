//! Single job execution with cancellation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::JobError;
use crate::handler::{JobHandler, JobResult};
use crate::job::Job;

/// Lifecycle of one job execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobExecutionState {
    Dispatched,
    Running,
    Succeeded,
    Failed,
    Canceled,
}

impl JobExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobExecutionState::Succeeded | JobExecutionState::Failed | JobExecutionState::Canceled
        )
    }

    /// Terminal state for a finished execution
    pub fn of(result: &Result<JobOutcome, JobError>) -> Self {
        match result {
            Ok(_) => JobExecutionState::Succeeded,
            Err(JobError::Cancelled) => JobExecutionState::Canceled,
            Err(_) => JobExecutionState::Failed,
        }
    }
}

/// Successful job execution
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub job_key: i64,
    pub payload: JobResult,
    pub started_at: DateTime<Utc>,
    pub duration_ms: i64,
}

/// Run `handler` for `job` until it finishes or `cancel` fires
///
/// Cancellation wins over a result that becomes ready in the same poll, and
/// a token cancelled before the call never starts the handler.
pub async fn execute_job(
    handler: &dyn JobHandler,
    job: &Job,
    cancel: &CancellationToken,
) -> Result<JobOutcome, JobError> {
    debug!(
        "Job {} ({}) state: {:?}",
        job.key,
        job.job_type,
        JobExecutionState::Dispatched
    );

    if cancel.is_cancelled() {
        info!("Job {} cancelled before start", job.key);
        return Err(JobError::Cancelled);
    }

    let started_at = Utc::now();
    debug!("Job {} state: {:?}", job.key, JobExecutionState::Running);

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(JobError::Cancelled),
        result = handler.handle(job, cancel) => result,
    };

    let duration_ms = (Utc::now() - started_at).num_milliseconds();

    match result {
        Ok(payload) => {
            info!(
                "Job {} ({}) succeeded in {}ms",
                job.key, job.job_type, duration_ms
            );
            Ok(JobOutcome {
                job_key: job.key,
                payload,
                started_at,
                duration_ms,
            })
        }
        Err(JobError::Cancelled) => {
            info!("Job {} cancelled after {}ms", job.key, duration_ms);
            Err(JobError::Cancelled)
        }
        Err(e) => {
            warn!("Job {} ({}) failed: {}", job.key, job.job_type, e);
            Err(e)
        }
    }
}

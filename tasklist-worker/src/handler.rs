use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use tokio_util::sync::CancellationToken;

use crate::error::JobError;
use crate::job::Job;

/// Output variables of a successful job
pub type JobResult = Map<String, JsonValue>;

/// Application logic for one job type
///
/// Handlers should watch `cancel` during long work and return
/// [`JobError::Cancelled`] once it fires. [`crate::execute_job`] enforces
/// this regardless: a handler still running when the token fires is dropped.
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Job type tag this handler is registered under
    fn job_type(&self) -> &str;

    async fn handle(&self, job: &Job, cancel: &CancellationToken) -> Result<JobResult, JobError>;
}

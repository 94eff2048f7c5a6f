use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::JobError;
use crate::handler::{JobHandler, JobResult};
use crate::job::Job;

pub const MOCK_JOB_TYPE: &str = "mock";

/// Handler for the `mock` job type
///
/// Echoes the job's variables and adds `"mock": "executed"`. An optional delay
/// simulates long work that honours cancellation.
#[derive(Debug, Clone, Default)]
pub struct MockJobHandler {
    delay: Option<Duration>,
    invocations: Arc<AtomicUsize>,
}

impl MockJobHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `handle` was entered
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobHandler for MockJobHandler {
    fn job_type(&self) -> &str {
        MOCK_JOB_TYPE
    }

    async fn handle(&self, job: &Job, cancel: &CancellationToken) -> Result<JobResult, JobError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        debug!("Mock handler executing job {}", job.key);

        if let Some(delay) = self.delay {
            tokio::select! {
                _ = cancel.cancelled() => return Err(JobError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let mut result = job.variables.clone();
        result.insert("mock".to_string(), JsonValue::from("executed"));
        Ok(result)
    }
}

//! Bounded, type-dispatched job execution for a named worker

use std::sync::Arc;
use tasklist_config::{Validatable, WorkerConfig};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::JobError;
use crate::executor::{execute_job, JobOutcome};
use crate::job::Job;
use crate::registry::HandlerRegistry;

/// Runs jobs through their registered handler, at most
/// `max_jobs_active` at a time
#[derive(Debug, Clone)]
pub struct JobRunner {
    name: String,
    registry: Arc<HandlerRegistry>,
    permits: Arc<Semaphore>,
    max_jobs_active: usize,
}

impl JobRunner {
    /// Build a runner from a validated worker configuration
    ///
    /// A zero slot count or one above [`Semaphore::MAX_PERMITS`] is rejected
    /// with [`JobError::Config`].
    pub fn new(config: &WorkerConfig, registry: HandlerRegistry) -> Result<Self, JobError> {
        config.validate()?;

        info!(
            "Creating job runner '{}' for types {:?} (max {} active)",
            config.name,
            registry.job_types(),
            config.max_jobs_active
        );
        Ok(Self {
            name: config.name.clone(),
            registry: Arc::new(registry),
            permits: Arc::new(Semaphore::new(config.max_jobs_active)),
            max_jobs_active: config.max_jobs_active,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Jobs currently holding an execution slot
    ///
    /// Still counts in-flight jobs after [`close`](Self::close).
    pub fn active_jobs(&self) -> usize {
        self.max_jobs_active - self.permits.available_permits()
    }

    /// Stop accepting jobs; executions already holding a slot run to the end
    pub fn close(&self) {
        info!("Closing job runner '{}'", self.name);
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    /// Execute one job, waiting for a free slot first
    ///
    /// The job is stamped with this runner's name. Cancellation while
    /// waiting for a slot ends the job without running its handler, and a
    /// closed runner fails with [`JobError::RunnerClosed`].
    pub async fn run(&self, mut job: Job, cancel: &CancellationToken) -> Result<JobOutcome, JobError> {
        let handler = self.registry.resolve(&job.job_type)?;
        job.worker = Some(self.name.clone());

        let _permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(JobError::Cancelled),
            permit = self.permits.acquire() => permit
                .map_err(|_| JobError::RunnerClosed(self.name.clone()))?,
        };

        debug!("Worker '{}' picked up job {}", self.name, job.key);
        execute_job(handler.as_ref(), &job, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_handler::MockJobHandler;
    use tasklist_config::MAX_JOBS_ACTIVE_LIMIT;

    fn registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry.register(MockJobHandler::new()).unwrap();
        registry
    }

    fn config(max_jobs_active: usize) -> WorkerConfig {
        WorkerConfig {
            name: "unit-worker".to_string(),
            max_jobs_active,
        }
    }

    #[test]
    fn test_slot_limit_matches_semaphore() {
        assert_eq!(MAX_JOBS_ACTIVE_LIMIT, Semaphore::MAX_PERMITS);
    }

    #[test]
    fn test_zero_slots_rejected() {
        let result = JobRunner::new(&config(0), registry());
        assert!(matches!(result, Err(JobError::Config(_))));
    }

    #[test]
    fn test_slots_above_semaphore_limit_rejected() {
        for slots in [Semaphore::MAX_PERMITS + 1, usize::MAX] {
            let result = JobRunner::new(&config(slots), registry());
            assert!(matches!(result, Err(JobError::Config(_))));
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut config = config(1);
        config.name = "  ".to_string();
        assert!(JobRunner::new(&config, registry()).is_err());
    }

    #[tokio::test]
    async fn test_closed_runner_refuses_jobs() {
        let handler = MockJobHandler::new();
        let mut registry = HandlerRegistry::new();
        registry.register(handler.clone()).unwrap();
        let runner = JobRunner::new(&config(2), registry).unwrap();

        assert!(!runner.is_closed());
        runner.close();
        assert!(runner.is_closed());

        let result = runner.run(Job::new(1, "mock"), &CancellationToken::new()).await;
        assert!(matches!(result, Err(JobError::RunnerClosed(ref name)) if name == "unit-worker"));
        assert_eq!(handler.invocations(), 0);
        assert_eq!(runner.active_jobs(), 0);
    }
}

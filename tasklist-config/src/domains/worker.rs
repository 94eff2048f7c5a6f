//! Job worker configuration

use serde::{Deserialize, Serialize};
use crate::validation::{Validatable, validate_at_most, validate_required_string, validate_positive};
use crate::error::ConfigResult;

/// Largest slot count a tokio semaphore accepts (`usize::MAX >> 3`)
pub const MAX_JOBS_ACTIVE_LIMIT: usize = usize::MAX >> 3;

/// Job worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name reported to the engine for jobs run by this process
    #[serde(default = "default_worker_name")]
    pub name: String,

    /// Maximum number of jobs executing at the same time
    #[serde(default = "default_max_jobs_active")]
    pub max_jobs_active: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: default_worker_name(),
            max_jobs_active: default_max_jobs_active(),
        }
    }
}

impl Validatable for WorkerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.name, "name", self.domain_name())?;
        validate_positive(self.max_jobs_active, "max_jobs_active", self.domain_name())?;
        validate_at_most(
            self.max_jobs_active,
            MAX_JOBS_ACTIVE_LIMIT,
            "max_jobs_active",
            self.domain_name(),
        )?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "worker"
    }
}

fn default_worker_name() -> String {
    "tasklist-worker".to_string()
}

fn default_max_jobs_active() -> usize {
    32
}

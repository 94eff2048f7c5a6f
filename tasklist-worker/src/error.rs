//! Error types for job execution

use tasklist_config::ConfigError;
use thiserror::Error;

/// Job execution errors
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Variable '{variable}' could not be mapped: {reason}")]
    Mapping { variable: String, reason: String },

    #[error("Job execution was cancelled")]
    Cancelled,

    #[error("Job handler failed: {0}")]
    Handler(#[from] anyhow::Error),

    #[error("No handler registered for job type '{0}'")]
    UnknownJobType(String),

    #[error("A handler is already registered for job type '{0}'")]
    DuplicateJobType(String),

    #[error("Invalid worker configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Job runner '{0}' is closed")]
    RunnerClosed(String),
}

impl JobError {
    pub fn mapping(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Mapping {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, JobError::Cancelled)
    }
}

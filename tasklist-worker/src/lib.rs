//! Job worker contract
//!
//! This crate defines how an external job dispatcher runs application logic
//! for a job type: the [`JobHandler`] trait, the [`Job`] it receives, typed
//! variable extraction, and [`execute_job`], which drives one execution to
//! success, failure, or cancellation.
//!
//! Polling, locking and reporting results back to the engine stay with the
//! dispatcher.

pub mod error;
pub mod executor;
pub mod handler;
pub mod job;
pub mod mock_handler;
pub mod registry;
pub mod runner;
pub mod variables;

// Re-export main types
pub use error::JobError;
pub use executor::{execute_job, JobExecutionState, JobOutcome};
pub use handler::{JobHandler, JobResult};
pub use job::Job;
pub use mock_handler::MockJobHandler;
pub use registry::HandlerRegistry;
pub use runner::JobRunner;
pub use variables::{JobVariables, VariableValue};

pub use tokio_util::sync::CancellationToken;

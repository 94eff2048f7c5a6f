//! Domain-driven configuration for the tasklist workspace
//!
//! Configuration is split by functional domain (GraphQL client, job worker,
//! logging), each with its own defaults and validation, and can be loaded
//! from a YAML file with environment variable overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    client::ClientConfig, logging::LoggingConfig, worker::{WorkerConfig, MAX_JOBS_ACTIVE_LIMIT},
    TasklistConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;

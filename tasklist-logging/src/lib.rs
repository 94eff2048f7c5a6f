//! Logging initialisation for the tasklist workspace
//!
//! All crates log through `tracing`; this crate installs the global
//! subscriber from a [`LoggingConfig`].

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
pub use tasklist_config::LoggingConfig;

//! Task types for the tasklist GraphQL API
//!
//! This crate provides the entity model exchanged with the workflow engine's
//! tasklist: tasks, their variables, and the input objects used when
//! querying or completing them. Field names follow the remote schema
//! (camelCase on the wire).

pub mod domain;
pub mod enums;
pub mod ids;
pub mod query;

// Re-export main types for convenience
pub use domain::{Task, Variable, VariableInput};
pub use enums::TaskState;
pub use ids::TaskId;
pub use query::TaskQuery;

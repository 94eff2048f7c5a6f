//! # Tasklist Service
//!
//! Typed access to the workflow engine's tasklist GraphQL API.
//!
//! [`TaskQueryFacade`] turns each domain operation (list, fetch, claim,
//! unclaim, complete) into one parameterised GraphQL request, sends it
//! through a transport obtained from an injected
//! [`ClientProvider`](tasklist_client::ClientProvider), and maps the named
//! response field back into [`Task`](tasklist_types::Task) values.
//!
//! A missing task is not an error: single-task operations return `None` and
//! list operations return an empty vector. Transport and GraphQL failures are
//! passed through unchanged.

pub mod documents;
pub mod error;
pub mod facade;
pub mod service;
pub mod unwrap;

pub use error::{TaskServiceError, TaskServiceResult};
pub use facade::TaskQueryFacade;
pub use service::TaskService;
pub use unwrap::unwrap_field;

//! GraphQL client functionality for the tasklist API
//!
//! This crate provides the request/response envelope, the transport seam the
//! task facade sends through, an HTTP transport built on reqwest, an offline
//! mock transport, and the client providers that hand out transport handles.

pub mod config;
pub mod errors;
pub mod mock;
pub mod provider;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use config::HttpTransportConfig;
pub use errors::ClientError;
pub use mock::MockTransport;
pub use provider::{ClientProvider, HttpClientProvider, StaticClientProvider, StaticToken, TokenSource};
pub use transport::{GraphqlTransport, HttpTransport};
pub use types::{GraphqlError, GraphqlRequest, GraphqlResponse, OperationKind};

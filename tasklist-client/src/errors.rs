//! Client error types

use crate::types::GraphqlError;

/// Error type for GraphQL client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL error: {}", format_graphql_errors(.0))]
    Protocol(Vec<GraphqlError>),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Client provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No mock response available for operation '{0}'")]
    NoMockResponse(String),
}

impl ClientError {
    /// Failure reaching the endpoint
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Http { .. })
    }

    /// Well-formed GraphQL error payload
    pub fn is_protocol(&self) -> bool {
        matches!(self, ClientError::Protocol(_))
    }

    /// The GraphQL errors carried by a protocol failure
    pub fn graphql_errors(&self) -> Option<&[GraphqlError]> {
        match self {
            ClientError::Protocol(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_graphql_errors(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

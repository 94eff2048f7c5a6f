use tasklist_client::ClientError;
use thiserror::Error;

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Errors crossing the facade boundary
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Transport, HTTP or GraphQL failure, unmodified
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The named response field did not have the expected shape
    #[error("Failed to map '{field}' response: {source}")]
    Mapping {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskServiceError {
    pub fn is_transport(&self) -> bool {
        matches!(self, TaskServiceError::Client(e) if e.is_transport())
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, TaskServiceError::Client(e) if e.is_protocol())
    }
}

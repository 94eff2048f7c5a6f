//! Offline transport with canned or computed responses
//!
//! Responses are keyed by operation name. Every request sent is recorded so
//! callers can assert on the exact document and variables that went out.

use crate::errors::ClientError;
use crate::transport::GraphqlTransport;
use crate::types::{GraphqlError, GraphqlRequest};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type ResponseFn = dyn Fn(&GraphqlRequest) -> Result<JsonValue, ClientError> + Send + Sync;

#[derive(Clone)]
enum MockResponse {
    Data(JsonValue),
    Errors(Vec<GraphqlError>),
}

/// Transport that never touches the network
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    handler: Option<Arc<ResponseFn>>,
    requests: Arc<Mutex<Vec<GraphqlRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with a function of the request
    ///
    /// Canned responses registered with [`add_response`](Self::add_response)
    /// still take precedence.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&GraphqlRequest) -> Result<JsonValue, ClientError> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Arc::new(handler)),
            ..Self::default()
        }
    }

    /// Return `data` for requests with this operation name
    pub fn add_response(&self, operation_name: &str, data: JsonValue) {
        self.responses
            .lock()
            .insert(operation_name.to_string(), MockResponse::Data(data));
        debug!("Added GraphQL mock for '{}'", operation_name);
    }

    /// Fail requests with this operation name with a protocol error
    pub fn add_errors(&self, operation_name: &str, errors: Vec<GraphqlError>) {
        self.responses
            .lock()
            .insert(operation_name.to_string(), MockResponse::Errors(errors));
        debug!("Added GraphQL error mock for '{}'", operation_name);
    }

    /// Requests sent so far, oldest first
    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<GraphqlRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.responses.lock().clear();
        self.requests.lock().clear();
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("responses", &self.responses.lock().len())
            .field("has_handler", &self.handler.is_some())
            .field("requests", &self.requests.lock().len())
            .finish()
    }
}

#[async_trait::async_trait]
impl GraphqlTransport for MockTransport {
    async fn send(&self, request: &GraphqlRequest) -> Result<JsonValue, ClientError> {
        self.requests.lock().push(request.clone());

        let name = request.display_name();
        let canned = self.responses.lock().get(name).cloned();

        match canned {
            Some(MockResponse::Data(data)) => {
                debug!("Found mock response for '{}'", name);
                Ok(data)
            }
            Some(MockResponse::Errors(errors)) => Err(ClientError::Protocol(errors)),
            None => match self.handler {
                Some(ref handler) => handler(request),
                None => {
                    debug!("No mock response found for '{}'", name);
                    Err(ClientError::NoMockResponse(name.to_string()))
                }
            },
        }
    }
}

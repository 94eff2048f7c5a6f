//! GraphQL transport implementation

use crate::config::HttpTransportConfig;
use crate::errors::ClientError;
use crate::types::{GraphqlRequest, GraphqlResponse};
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Instant;
use tracing::{debug, warn};

/// Transport trait for sending one GraphQL request
///
/// On success the `data` member of the response is returned as-is (`Null`
/// when the server sent none). A response carrying GraphQL `errors` is
/// surfaced as [`ClientError::Protocol`] without interpretation.
#[async_trait::async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn send(&self, request: &GraphqlRequest) -> Result<JsonValue, ClientError>;
}

/// GraphQL over HTTP POST
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpTransport {
    /// Create a transport with its own connection pool
    pub fn new(config: &HttpTransportConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(build_http_client(config)?, config.endpoint.clone()))
    }

    /// Create a transport sharing an existing reqwest client
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            bearer_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build a reqwest client from transport settings
pub(crate) fn build_http_client(config: &HttpTransportConfig) -> Result<Client, ClientError> {
    debug!(
        "Creating HTTP client for {} with {}s timeout",
        config.endpoint,
        config.timeout.as_secs()
    );

    Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(!config.verify_ssl)
        .build()
        .map_err(|e| ClientError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

#[async_trait::async_trait]
impl GraphqlTransport for HttpTransport {
    async fn send(&self, request: &GraphqlRequest) -> Result<JsonValue, ClientError> {
        let start = Instant::now();
        debug!(
            "Sending GraphQL {} '{}' to {}",
            request.kind,
            request.display_name(),
            self.endpoint
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(ref token) = self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            "GraphQL response for '{}': {} in {}ms",
            request.display_name(),
            status.as_u16(),
            start.elapsed().as_millis()
        );

        // Servers may answer validation/auth failures with a 4xx and a GraphQL body
        let parsed = serde_json::from_str::<GraphqlResponse>(&body);

        if !status.is_success() {
            return match parsed {
                Ok(graphql) if !graphql.errors.is_empty() => {
                    warn!(
                        "GraphQL '{}' failed with HTTP {} and {} error(s)",
                        request.display_name(),
                        status.as_u16(),
                        graphql.errors.len()
                    );
                    Err(ClientError::Protocol(graphql.errors))
                }
                _ => Err(ClientError::Http {
                    status: status.as_u16(),
                    body,
                }),
            };
        }

        let graphql = parsed?;
        if !graphql.errors.is_empty() {
            warn!(
                "GraphQL '{}' returned {} error(s)",
                request.display_name(),
                graphql.errors.len()
            );
            return Err(ClientError::Protocol(graphql.errors));
        }

        Ok(graphql.data.unwrap_or(JsonValue::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(&HttpTransportConfig::new(format!("{}/graphql", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn test_successful_query_returns_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "operationName": "task",
                "variables": {"id": "1"}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"task": {"id": "1"}}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = GraphqlRequest::query("query task($id: String!) { task(id: $id) { id } }")
            .with_operation_name("task")
            .with_variable("id", "1");

        let data = transport_for(&mock_server).send(&request).await.unwrap();
        assert_eq!(data, json!({"task": {"id": "1"}}));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server).with_bearer_token("test-token");
        let data = transport.send(&GraphqlRequest::query("{ tasks { id } }")).await.unwrap();
        assert_eq!(data, json!({}));
    }

    #[tokio::test]
    async fn test_graphql_errors_are_protocol_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{"message": "Task is already assigned"}]
            })))
            .mount(&mock_server)
            .await;

        let err = transport_for(&mock_server)
            .send(&GraphqlRequest::mutation("mutation { claimTask { id } }"))
            .await
            .unwrap_err();

        assert!(err.is_protocol());
        assert_eq!(err.graphql_errors().unwrap()[0].message, "Task is already assigned");
    }

    #[tokio::test]
    async fn test_unauthorized_with_graphql_body_is_protocol_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "errors": [{"message": "Unauthorized"}]
            })))
            .mount(&mock_server)
            .await;

        let err = transport_for(&mock_server)
            .send(&GraphqlRequest::query("{ tasks { id } }"))
            .await
            .unwrap_err();
        assert!(err.is_protocol());
    }

    #[tokio::test]
    async fn test_server_error_without_graphql_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let err = transport_for(&mock_server)
            .send(&GraphqlRequest::query("{ tasks { id } }"))
            .await
            .unwrap_err();

        match err {
            ClientError::Http { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = transport_for(&mock_server)
            .send(&GraphqlRequest::query("{ tasks { id } }"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let transport = HttpTransport::new(&HttpTransportConfig::new("http://127.0.0.1:9/graphql")).unwrap();
        let err = transport
            .send(&GraphqlRequest::query("{ tasks { id } }"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}

//! Client providers
//!
//! A provider hands out a ready-to-use transport handle. The facade asks for
//! a fresh handle on every operation, so providers must be cheap to call and
//! safe to await from many tasks at once.

use crate::config::HttpTransportConfig;
use crate::errors::ClientError;
use crate::transport::{build_http_client, GraphqlTransport, HttpTransport};
use reqwest::Client;
use std::sync::Arc;
use tasklist_config::ClientConfig;
use tracing::debug;

/// Yields transport handles, authenticating as needed
#[async_trait::async_trait]
pub trait ClientProvider: Send + Sync {
    async fn client(&self) -> Result<Arc<dyn GraphqlTransport>, ClientError>;
}

/// Source of bearer tokens for the HTTP transport
///
/// Token acquisition and refresh live behind this trait; implementations
/// decide whether and how to cache.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<String, ClientError>;
}

/// A fixed token, e.g. from configuration
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String, ClientError> {
        Ok(self.0.clone())
    }
}

/// Always returns the same transport
#[derive(Clone)]
pub struct StaticClientProvider {
    transport: Arc<dyn GraphqlTransport>,
}

impl StaticClientProvider {
    pub fn new<T: GraphqlTransport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_arc(transport: Arc<dyn GraphqlTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl ClientProvider for StaticClientProvider {
    async fn client(&self) -> Result<Arc<dyn GraphqlTransport>, ClientError> {
        Ok(Arc::clone(&self.transport))
    }
}

/// Builds HTTP transports over a shared connection pool
///
/// When a [`TokenSource`] is configured, each handle carries the token current
/// at acquisition time.
#[derive(Clone)]
pub struct HttpClientProvider {
    client: Client,
    endpoint: String,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl HttpClientProvider {
    pub fn new(config: &HttpTransportConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: config.endpoint.clone(),
            token_source: None,
        })
    }

    /// Build from the `client` configuration domain, using its static token if set
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let provider = Self::new(&HttpTransportConfig::from(config.clone()))?;
        Ok(match config.access_token {
            Some(ref token) => provider.with_token_source(StaticToken::new(token.clone())),
            None => provider,
        })
    }

    pub fn with_token_source<S: TokenSource + 'static>(mut self, source: S) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ClientProvider for HttpClientProvider {
    async fn client(&self) -> Result<Arc<dyn GraphqlTransport>, ClientError> {
        let mut transport = HttpTransport::with_client(self.client.clone(), self.endpoint.clone());

        if let Some(ref source) = self.token_source {
            let token = source.token().await?;
            transport = transport.with_bearer_token(token);
        }

        debug!("Acquired GraphQL transport for {}", self.endpoint);
        Ok(Arc::new(transport))
    }
}

//! Transport configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tasklist_config::ClientConfig;

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// GraphQL endpoint
    pub endpoint: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl HttpTransportConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        ClientConfig::default().into()
    }
}

impl From<ClientConfig> for HttpTransportConfig {
    fn from(config: ClientConfig) -> Self {
        Self {
            endpoint: config.endpoint,
            timeout: config.timeout,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
        }
    }
}

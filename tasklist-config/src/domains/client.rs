//! Tasklist GraphQL client configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tasklist GraphQL client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// GraphQL endpoint of the tasklist API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_timeout"
    )]
    pub timeout: Duration,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to verify SSL certificates
    #[serde(default = "crate::domains::utils::default_true")]
    pub verify_ssl: bool,

    /// Static bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            verify_ssl: true,
            access_token: None,
        }
    }
}

impl Validatable for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.endpoint, "endpoint", self.domain_name())?;
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;
        validate_required_string(&self.user_agent, "user_agent", self.domain_name())?;

        if let Some(ref token) = self.access_token {
            validate_required_string(token, "access_token", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "client"
    }
}

// Default value functions
fn default_endpoint() -> String {
    "http://localhost:8082/graphql".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    "tasklist-rs/0.1".to_string()
}

//! Client configuration.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::ClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    concat!("alfresco-rest/", env!("CARGO_PKG_VERSION")).to_owned()
}

/// Where and how to reach the repository.
///
/// Deserialises from JSON; only `baseUrl` is required.
///
/// ```json
/// { "baseUrl": "http://localhost:8080/alfresco", "timeoutSecs": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Repository web application root, e.g. `http://localhost:8080/alfresco`.
    /// API paths are appended to it verbatim.
    pub base_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with default timeout and user agent.
    ///
    /// Fails if `base_url` is not an absolute `http`/`https` URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let config = Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration; call after deserialising.
    pub fn validate(&self) -> Result<(), ClientError> {
        let url = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidConfiguration {
            message: format!("base URL '{}' is invalid: {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfiguration {
                message: format!("base URL '{}' must use http or https", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::InvalidConfiguration {
                message: "timeout must be at least one second".to_owned(),
            });
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the absolute URL of an API path.
    ///
    /// The path is appended to the base URL rather than resolved against it,
    /// so a base URL with a context path (`/alfresco`) keeps that prefix.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(|e| ClientError::InvalidConfiguration {
            message: format!("path '{path}' does not form a valid URL: {e}"),
        })
    }
}

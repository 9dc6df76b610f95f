//! HTTP transport port and its `reqwest` implementation.
//!
//! [`RestClient`](crate::RestClient) only talks to the [`Transport`] trait, so
//! tests and alternative HTTP stacks can substitute their own implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Url;
use tracing::debug;

use crate::{ClientConfig, ClientError, QueryParams};

const APPLICATION_JSON: &str = "application/json";

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully built request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL without query string.
    pub url: Url,
    /// Query parameters, appended by the transport.
    pub query: QueryParams,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

/// Raw response as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body; empty when the server sent none.
    pub body: Vec<u8>,
    /// Parsed `Retry-After` header (delay-seconds form only).
    pub retry_after: Option<Duration>,
}

impl ApiResponse {
    /// Returns `true` for `2xx` statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`ApiRequest`]s and returns raw [`ApiResponse`]s.
///
/// Implementations report only transport-level failures; non-success
/// statuses are returned as ordinary responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// [`Transport`] over a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the underlying HTTP client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url)
            .header(ACCEPT, APPLICATION_JSON);
        if !request.query.is_empty() {
            builder = builder.query(request.query.as_slice());
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, APPLICATION_JSON).body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(Box::new(e)))?
            .to_vec();

        debug!(status, bytes = body.len(), "received response");
        Ok(ApiResponse {
            status,
            body,
            retry_after,
        })
    }
}

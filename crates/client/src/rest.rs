//! Typed request execution.
//!
//! [`RestClient`] turns a path, query parameters and an optional body into an
//! HTTP call and decodes the response through the envelope codec, so callers
//! get the unwrapped shape directly.

use codec::envelope;
use codec::Shape;
use tracing::{debug, instrument, warn};

use crate::transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
use crate::{ClientConfig, ClientError, QueryParams};

/// Envelope-aware client for the Alfresco v1 REST API.
#[derive(Debug, Clone)]
pub struct RestClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl RestClient<ReqwestTransport> {
    /// Creates a client backed by `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> RestClient<T> {
    /// Creates a client backed by a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET path`, decoding the response as `S`.
    #[instrument(skip(self, query), fields(shape = S::shape_name()))]
    pub async fn get<S: Shape>(&self, path: &str, query: &QueryParams) -> Result<S, ClientError> {
        let response = self.execute(Method::Get, path, query, None).await?;
        decode_body(&response)
    }

    /// `POST path` with a JSON body, decoding the response as `S`.
    #[instrument(skip(self, query, body), fields(shape = S::shape_name()))]
    pub async fn post<B: Shape, S: Shape>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
    ) -> Result<S, ClientError> {
        let body = envelope::encode_vec(body)?;
        let response = self.execute(Method::Post, path, query, Some(body)).await?;
        decode_body(&response)
    }

    /// `PUT path` with a JSON body, decoding the response as `S`.
    #[instrument(skip(self, query, body), fields(shape = S::shape_name()))]
    pub async fn put<B: Shape, S: Shape>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
    ) -> Result<S, ClientError> {
        let body = envelope::encode_vec(body)?;
        let response = self.execute(Method::Put, path, query, Some(body)).await?;
        decode_body(&response)
    }

    /// `DELETE path`; any response body is ignored.
    #[instrument(skip(self, query))]
    pub async fn delete(&self, path: &str, query: &QueryParams) -> Result<(), ClientError> {
        self.execute(Method::Delete, path, query, None).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.config.endpoint_url(path)?;
        debug!(?method, %url, params = query.len(), "sending request");

        let request = ApiRequest {
            method,
            url: url.clone(),
            query: query.clone(),
            body,
        };
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            warn!(status = response.status, %url, "request failed");
            return Err(ClientError::Status {
                url: url.to_string(),
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
                retry_after: response.retry_after,
            });
        }
        Ok(response)
    }
}

fn decode_body<S: Shape>(response: &ApiResponse) -> Result<S, ClientError> {
    envelope::decode_slice(&response.body).map_err(|err| {
        warn!(shape = err.shape(), error = %err, "response body rejected");
        ClientError::Codec(err)
    })
}

//! Error and retry-policy types for the HTTP client layer.
//!
//! The client never retries on its own. [`ClientError::retry_policy`] tells
//! the caller whether a retry could succeed.

use std::time::Duration;

use codec::CodecError;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryPolicy {
    /// The request may be sent again.
    Retryable {
        /// Minimum back-off before the next attempt, from the `Retry-After`
        /// header. `None` means the caller applies its own schedule.
        after: Option<Duration>,
    },
    /// Sending the same request again will fail the same way.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Client errors
// ---------------------------------------------------------------------------

/// Errors produced while building, sending, or decoding a request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client configuration is unusable (e.g. the base URL does not parse).
    #[error("Invalid client configuration: {message}")]
    InvalidConfiguration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("HTTP transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The repository answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// Requested URL, without query string.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded as UTF-8.
        body: String,
        /// Delay requested by a `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// The response body violated the envelope or did not match the shape.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ClientError {
    /// Classifies the error for callers that implement their own retries.
    ///
    /// Transport failures, `429 Too Many Requests` and `5xx` responses are
    /// retryable; codec and configuration errors never are.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Transport(_) => RetryPolicy::Retryable { after: None },
            Self::Status {
                status,
                retry_after,
                ..
            } if *status == 429 || (500..600).contains(status) => RetryPolicy::Retryable {
                after: *retry_after,
            },
            _ => RetryPolicy::NonRetryable,
        }
    }
}

//! HTTP client layer for the Alfresco v1 REST API.
//!
//! Sits on top of the [`codec`] crate at the data-marshalling boundary:
//! outbound, multi-valued parameters are collapsed into single query pairs by
//! [`QueryParams`]; inbound, response bodies are decoded through
//! [`codec::envelope`] into the caller's unwrapped shape.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport selection, URL building and status handling
//! live here. The endpoint catalogue and credential handling are left to
//! callers, which pass paths and bodies in.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `ClientConfig` |
//! | [`query`] | `QueryParams` |
//! | [`transport`] | `Transport` port, `ReqwestTransport` |
//! | [`rest`] | `RestClient` |
//! | [`errors`] | `ClientError`, `RetryPolicy` |

pub mod config;
pub mod errors;
pub mod query;
pub mod rest;
pub mod transport;

pub use config::ClientConfig;
pub use errors::{ClientError, RetryPolicy};
pub use query::QueryParams;
pub use rest::RestClient;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};

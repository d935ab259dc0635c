//! HTTP Client port

use std::future::Future;

use nectar_domain::{HttpMethod, ResponseSpec};

/// A request after send-time validation, ready for the transport.
///
/// Headers are resolved name/value pairs and `body` is the exact
/// payload to put on the wire; nothing here needs further parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL text, unparsed.
    pub url: String,
    /// Resolved header pairs.
    pub headers: Vec<(String, String)>,
    /// Outgoing payload, if any.
    pub body: Option<String>,
}

/// Error type for transport-level failures.
///
/// Every variant renders as human-readable text; the executor maps them
/// all to a status-0 response for the view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete within the transport timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established (DNS, refused, reset).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP transport, allowing the application
/// layer to be independent of specific HTTP libraries. Implementations
/// perform exactly one attempt per call: no retries, no cancellation.
pub trait HttpClient: Send + Sync {
    /// Sends the prepared request and reads the full response body as
    /// text (no streaming).
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures; any real
    /// wire response, whatever its status, is a success.
    fn send(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}

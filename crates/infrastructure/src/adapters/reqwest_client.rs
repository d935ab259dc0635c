//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. One call, one
//! attempt: no retries, and an in-flight request runs to completion,
//! error, or the client timeout.

use std::time::Duration;

use reqwest::{Client, Method, Url};

use nectar_application::ports::{HttpClient, HttpClientError, PreparedRequest};
use nectar_domain::{HttpMethod, ResponseSpec};

/// Transport timeout applied to every request, in milliseconds.
const TIMEOUT_MS: u64 = 30_000;

/// Transport timeout applied to every request.
const TIMEOUT: Duration = Duration::from_millis(TIMEOUT_MS);

/// Maximum redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP transport backed by `reqwest::Client`.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a transport with the default settings: 30 second
    /// timeout, up to 10 redirects, TLS verification enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("nectar/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: TIMEOUT_MS,
            };
        }
        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }
        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: PreparedRequest) -> Result<ResponseSpec, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Self::map_error(&e))?;

        Ok(ResponseSpec::new(status, body))
    }
}

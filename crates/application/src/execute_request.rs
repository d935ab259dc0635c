//! Request executor use case.
//!
//! Turns the raw editor fields of a send intent into an actual network
//! call and reduces every outcome into a uniform [`ResponseSpec`]:
//! real wire responses keep their status and raw body text; malformed
//! input and transport failures become status-0 responses whose body is
//! a human-readable description. The executor never parses or validates
//! the response itself.

use std::sync::Arc;

use thiserror::Error;

use nectar_domain::{HttpMethod, ResponseSpec};

use crate::ports::{HttpClient, PreparedRequest};

/// Raw editor field contents of a send intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendInput {
    /// Target URL text.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Header text, expected to be a JSON object; may be empty.
    pub headers: String,
    /// Body text, expected to be JSON; may be empty.
    pub body: String,
}

/// Send-time validation failures. Both short-circuit before the
/// transport is touched.
#[derive(Debug, Error)]
enum PrepareError {
    #[error("invalid headers JSON: {0}")]
    Headers(serde_json::Error),

    #[error("invalid body JSON: {0}")]
    Body(serde_json::Error),
}

/// Use case for executing HTTP requests.
///
/// Wraps the [`HttpClient`] port with the send-time validation rules;
/// the router spawns one execution per send intent.
pub struct RequestExecutor<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> RequestExecutor<C> {
    /// Creates a new executor over the given transport.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the send intent and reduces the outcome.
    ///
    /// This never fails: anything short of a real wire response comes
    /// back as a status-0 [`ResponseSpec`].
    pub async fn execute(&self, input: SendInput) -> ResponseSpec {
        let prepared = match prepare(&input) {
            Ok(prepared) => prepared,
            Err(error) => {
                tracing::debug!(%error, "send rejected before transport");
                return ResponseSpec::local_failure(error.to_string());
            }
        };

        match self.client.send(prepared).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, url = %input.url, "transport failure");
                ResponseSpec::local_failure(error.to_string())
            }
        }
    }
}

impl<C: HttpClient> Clone for RequestExecutor<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

/// Validates the raw fields and resolves the wire request.
///
/// - Non-empty header text must parse as a JSON object; values that are
///   not strings are serialized compactly.
/// - For non-GET methods with non-empty body text, the body must parse
///   as JSON and is re-serialized compactly as the payload.
/// - `Content-Type: application/json` is injected when a body is being
///   sent and no Content-Type header was supplied (ASCII
///   case-insensitive check).
fn prepare(input: &SendInput) -> Result<PreparedRequest, PrepareError> {
    let mut headers = Vec::new();
    if !input.headers.is_empty() {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&input.headers).map_err(PrepareError::Headers)?;
        for (name, value) in map {
            let value = match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            headers.push((name, value));
        }
    }

    let body = if input.method.sends_body() && !input.body.is_empty() {
        let value: serde_json::Value =
            serde_json::from_str(&input.body).map_err(PrepareError::Body)?;
        Some(serde_json::to_string(&value).map_err(PrepareError::Body)?)
    } else {
        None
    };

    if body.is_some()
        && !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"))
    {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }

    Ok(PreparedRequest {
        method: input.method,
        url: input.url.clone(),
        headers,
        body,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use crate::ports::HttpClientError;

    use super::*;

    /// Transport spy: counts calls and records the last prepared
    /// request.
    struct SpyClient {
        calls: AtomicUsize,
        last: Mutex<Option<PreparedRequest>>,
        result: Result<ResponseSpec, HttpClientError>,
    }

    impl SpyClient {
        fn returning(result: Result<ResponseSpec, HttpClientError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
                result,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last(&self) -> Option<PreparedRequest> {
            self.last.lock().unwrap().clone()
        }
    }

    impl HttpClient for SpyClient {
        async fn send(&self, request: PreparedRequest) -> Result<ResponseSpec, HttpClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request);
            self.result.clone()
        }
    }

    fn input(method: HttpMethod, headers: &str, body: &str) -> SendInput {
        SendInput {
            url: "http://localhost:8080/x".to_string(),
            method,
            headers: headers.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_malformed_headers_short_circuit() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(200, "ok")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor
            .execute(input(HttpMethod::Get, "{not json", ""))
            .await;

        assert_eq!(response.status, 0);
        assert!(response.body.contains("invalid headers"));
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_short_circuits_for_post() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(200, "ok")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor
            .execute(input(HttpMethod::Post, "{}", "{broken"))
            .await;

        assert_eq!(response.status, 0);
        assert!(response.body.contains("invalid body"));
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_never_parses_body() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(200, "ok")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor
            .execute(input(HttpMethod::Get, "{}", "{broken"))
            .await;

        assert_eq!(response.status, 200);
        let sent = spy.last().unwrap();
        assert_eq!(sent.body, None);
        assert!(sent.headers.is_empty());
    }

    #[tokio::test]
    async fn test_post_injects_content_type() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(201, "created")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor
            .execute(input(HttpMethod::Post, "", r#"{"a":1}"#))
            .await;

        assert_eq!(response.status, 201);
        let sent = spy.last().unwrap();
        assert_eq!(sent.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(
            sent.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[tokio::test]
    async fn test_supplied_content_type_wins() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(200, "ok")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor
            .execute(input(
                HttpMethod::Put,
                r#"{"content-type": "application/vnd.api+json"}"#,
                r#"{"a":1}"#,
            ))
            .await;

        assert_eq!(response.status, 200);
        let sent = spy.last().unwrap();
        assert_eq!(sent.headers.len(), 1);
        assert_eq!(sent.headers[0].1, "application/vnd.api+json");
    }

    #[tokio::test]
    async fn test_non_string_header_values_are_serialized() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(200, "ok")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        executor
            .execute(input(HttpMethod::Get, r#"{"X-Retry": 3}"#, ""))
            .await;

        let sent = spy.last().unwrap();
        assert_eq!(sent.headers, vec![("X-Retry".to_string(), "3".to_string())]);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_status_zero() {
        let spy = SpyClient::returning(Err(HttpClientError::ConnectionFailed(
            "connection refused".to_string(),
        )));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor.execute(input(HttpMethod::Get, "", "")).await;

        assert_eq!(response.status, 0);
        assert!(response.body.contains("connection refused"));
        assert_eq!(spy.calls(), 1);
    }

    #[tokio::test]
    async fn test_wire_response_passes_through_untouched() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(500, "<html>oops</html>")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        let response = executor.execute(input(HttpMethod::Get, "", "")).await;

        // The executor does not parse or validate the response body.
        assert_eq!(response, ResponseSpec::new(500, "<html>oops</html>"));
    }

    #[tokio::test]
    async fn test_body_is_normalized_compact() {
        let spy = SpyClient::returning(Ok(ResponseSpec::new(200, "ok")));
        let executor = RequestExecutor::new(Arc::clone(&spy));

        executor
            .execute(input(HttpMethod::Post, "", "{ \"a\" : 1 }\n"))
            .await;

        let sent = spy.last().unwrap();
        assert_eq!(sent.body.as_deref(), Some(r#"{"a":1}"#));
    }
}

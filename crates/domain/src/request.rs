//! Stored request type

use serde::{Deserialize, Serialize};

use crate::id::{Id, generate_id};
use crate::method::HttpMethod;

/// Default header text for a freshly created request.
pub const DEFAULT_HEADERS: &str = "{}";

/// Default body text for a freshly created request.
pub const DEFAULT_BODY: &str = "{}";

/// A stored HTTP call definition plus a display name.
///
/// `headers` and `body` are free-form text that may be invalid JSON;
/// nothing here parses or validates them. Validation happens at send
/// time, in the request executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRequest {
    /// Unique identifier within the parent collection.
    pub id: Id,
    /// Human-readable name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL.
    pub url: String,
    /// Header text, serialized JSON object.
    pub headers: String,
    /// Body text, serialized JSON.
    pub body: String,
}

impl StoredRequest {
    /// Creates a new request with a fresh id and the default fields:
    /// GET, empty URL, `{}` headers, `{}` body.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            method: HttpMethod::default(),
            url: String::new(),
            headers: DEFAULT_HEADERS.to_string(),
            body: DEFAULT_BODY.to_string(),
        }
    }
}

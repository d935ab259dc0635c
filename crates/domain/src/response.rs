//! Response specification type

use serde::{Deserialize, Serialize};

/// Normalized result of sending a request.
///
/// `status` is the numeric HTTP status for real wire responses, always
/// >= 100. Status [`ResponseSpec::LOCAL_FAILURE`] (0) is a sentinel
/// meaning no response was received: the input was malformed or the
/// transport failed, and `body` holds a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code, or 0 for local failures.
    pub status: u16,
    /// Raw response body text, or the failure description.
    pub body: String,
}

impl ResponseSpec {
    /// Sentinel status meaning no response was received.
    pub const LOCAL_FAILURE: u16 = 0;

    /// Creates a response from a real wire status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a local-failure response carrying a description of what
    /// went wrong in place of a body.
    #[must_use]
    pub fn local_failure(message: impl Into<String>) -> Self {
        Self {
            status: Self::LOCAL_FAILURE,
            body: message.into(),
        }
    }

    /// Returns true if no response was received from the server.
    #[must_use]
    pub const fn is_local_failure(&self) -> bool {
        self.status == Self::LOCAL_FAILURE
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_checks() {
        let ok = ResponseSpec::new(200, "{}");
        assert!(ok.is_success());
        assert!(!ok.is_local_failure());

        let not_found = ResponseSpec::new(404, "missing");
        assert!(!not_found.is_success());
        assert!(!not_found.is_local_failure());
    }

    #[test]
    fn test_local_failure() {
        let failed = ResponseSpec::local_failure("connection refused");
        assert_eq!(failed.status, 0);
        assert!(failed.is_local_failure());
        assert!(!failed.is_success());
        assert_eq!(failed.body, "connection refused");
    }
}

//! Collection type

use serde::{Deserialize, Serialize};

use crate::id::{Id, generate_id};
use crate::request::StoredRequest;

/// A named, ordered group of stored requests.
///
/// Identity is `id`, never position. Insertion order of `requests` is
/// preserved and is the display order. A request belongs to exactly one
/// collection and never outlives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier across the whole store.
    pub id: Id,
    /// Human-readable collection name.
    pub name: String,
    /// Requests in display order.
    #[serde(default)]
    pub requests: Vec<StoredRequest>,
}

impl Collection {
    /// Creates a new empty collection with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            requests: Vec::new(),
        }
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn request(&self, request_id: &str) -> Option<&StoredRequest> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    /// Looks up a request by id, mutably.
    pub fn request_mut(&mut self, request_id: &str) -> Option<&mut StoredRequest> {
        self.requests.iter_mut().find(|r| r.id == request_id)
    }
}

//! ID generation utilities.

use uuid::Uuid;

/// Opaque identifier for collections and requests.
///
/// Stored as a string so the persisted record stays self-describing.
pub type Id = String;

/// Generates a new UUID v7 as a string.
///
/// UUID v7 embeds the creation timestamp, so ids sort roughly in
/// creation order across the whole store.
#[must_use]
pub fn generate_id() -> Id {
    Uuid::now_v7().to_string()
}

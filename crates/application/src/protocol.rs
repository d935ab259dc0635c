//! Wire protocol between the rendering surface and the router.
//!
//! The surface forwards user intent as discrete commands and receives
//! state pushes back. Shapes follow the host's JSON message protocol:
//! every message is an object tagged by a `command` field.

use serde::{Deserialize, Serialize};

use nectar_domain::{Collection, HttpMethod, Id, ResponseSpec, StoredRequest};

use crate::selection::{SelectionDirective, SelectionUpdate, serialize_directive};

/// An inbound intent from the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Fetch the full collection list (session start).
    GetCollections,
    /// Fire an HTTP request with the given editor field contents.
    SendRequest {
        /// Target URL text.
        url: String,
        /// HTTP method.
        method: HttpMethod,
        /// Header text, expected to be a JSON object.
        headers: String,
        /// Body text, expected to be JSON.
        body: String,
    },
    /// Create a collection; the name is prompted interactively.
    AddCollection,
    /// Rename a collection; the name is prompted interactively.
    RenameCollection {
        /// Target collection id.
        id: Id,
    },
    /// Delete a collection and everything in it.
    DeleteCollection {
        /// Target collection id.
        id: Id,
    },
    /// Create a request; the name is prompted interactively.
    AddRequest {
        /// Owning collection id.
        collection_id: Id,
    },
    /// Rename a request; the name is prompted interactively.
    RenameRequest {
        /// Owning collection id.
        collection_id: Id,
        /// Target request id.
        request_id: Id,
    },
    /// Delete a request.
    DeleteRequest {
        /// Owning collection id.
        collection_id: Id,
        /// Target request id.
        request_id: Id,
    },
    /// Replace a stored request wholesale.
    UpdateRequest {
        /// Owning collection id.
        collection_id: Id,
        /// Full replacement request (matched by its `id`).
        request: StoredRequest,
    },
}

/// An outbound push to the view.
///
/// `Collections` carries the full list plus selection directives; a
/// directive of `Keep` is omitted from the wire, `Clear` serializes as
/// `null`, and `Select` as the id string. `Response` carries the
/// normalized result of a send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ViewPush {
    /// The full collection list after a load or mutation.
    Collections {
        /// Ordered collection list.
        data: Vec<Collection>,
        /// Directive for the selected collection.
        #[serde(
            rename = "selectCollectionId",
            skip_serializing_if = "SelectionDirective::is_keep",
            serialize_with = "serialize_directive"
        )]
        select_collection: SelectionDirective,
        /// Directive for the selected request.
        #[serde(
            rename = "selectRequestId",
            skip_serializing_if = "SelectionDirective::is_keep",
            serialize_with = "serialize_directive"
        )]
        select_request: SelectionDirective,
    },
    /// The outcome of a send, real or status-0 local failure.
    Response {
        /// HTTP status, or 0 when no response was received.
        status: u16,
        /// Raw response text or failure description.
        body: String,
    },
}

impl ViewPush {
    /// Builds a collections push from a list and a directive pair.
    #[must_use]
    pub fn collections(data: Vec<Collection>, update: SelectionUpdate) -> Self {
        Self::Collections {
            data,
            select_collection: update.collection,
            select_request: update.request,
        }
    }

    /// Builds a response push.
    #[must_use]
    pub fn response(response: ResponseSpec) -> Self {
        Self::Response {
            status: response.status,
            body: response.body,
        }
    }
}

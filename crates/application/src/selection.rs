//! Selection transition rules.
//!
//! The view highlights a "currently open" collection and request. That
//! selection is ephemeral session state, recomputed by the router after
//! each command and never persisted. [`selection_for`] is the single,
//! total mapping from a completed command to the directives the view
//! receives, so the coupling between mutations and selection is
//! testable on its own.

use serde::Serializer;

use nectar_domain::Id;

/// What the view should do with one side of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDirective {
    /// Leave the current selection alone.
    Keep,
    /// Drop the current selection.
    Clear,
    /// Select the given id.
    Select(Id),
}

impl SelectionDirective {
    /// Returns true for [`SelectionDirective::Keep`].
    ///
    /// Used to omit the directive from the wire push entirely, which is
    /// how the view protocol encodes "unchanged".
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Wire encoding for a directive field: `Clear` is `null`, `Select` is
/// the id string. `Keep` never reaches here because the field is
/// skipped.
pub(crate) fn serialize_directive<S: Serializer>(
    directive: &SelectionDirective,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match directive {
        SelectionDirective::Select(id) => serializer.serialize_some(id),
        _ => serializer.serialize_none(),
    }
}

/// Directive pair for one push: collection side and request side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionUpdate {
    /// Directive for the selected collection.
    pub collection: SelectionDirective,
    /// Directive for the selected request.
    pub request: SelectionDirective,
}

/// The router's ephemeral selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Currently selected collection, if any.
    pub collection_id: Option<Id>,
    /// Currently selected request, if any.
    pub request_id: Option<Id>,
}

impl Selection {
    /// Applies a directive pair to this state.
    pub fn apply(&mut self, update: &SelectionUpdate) {
        apply_one(&mut self.collection_id, &update.collection);
        apply_one(&mut self.request_id, &update.request);
    }
}

fn apply_one(slot: &mut Option<Id>, directive: &SelectionDirective) {
    match directive {
        SelectionDirective::Keep => {}
        SelectionDirective::Clear => *slot = None,
        SelectionDirective::Select(id) => *slot = Some(id.clone()),
    }
}

/// A command the router has just applied, with the ids the selection
/// rules need.
#[derive(Debug, Clone, Copy)]
pub enum CommandOutcome<'a> {
    /// A collection was created.
    CollectionAdded {
        /// Id of the new collection.
        id: &'a str,
    },
    /// A collection was renamed.
    CollectionRenamed,
    /// A collection (and all its requests) was removed.
    CollectionDeleted,
    /// A request was created.
    RequestAdded {
        /// Id of the owning collection.
        collection_id: &'a str,
        /// Id of the new request.
        request_id: &'a str,
    },
    /// A request was renamed.
    RequestRenamed {
        /// Id of the owning collection.
        collection_id: &'a str,
        /// Id of the renamed request.
        request_id: &'a str,
    },
    /// A request was removed.
    RequestDeleted {
        /// Id of the owning collection.
        collection_id: &'a str,
    },
    /// A request was replaced wholesale.
    RequestUpdated,
    /// The list was loaded without mutation.
    Listed,
}

/// Maps a completed command to the selection directives for its push.
///
/// Total over [`CommandOutcome`]:
/// - a new collection is selected, with no request open;
/// - a new request opens both itself and its owner;
/// - a rename re-selects the same pair, confirming it survived;
/// - deleting a collection clears both sides, since a request cannot
///   stay selected once its parent is gone;
/// - deleting a request keeps its collection open;
/// - renames of collections, updates, and plain loads change nothing.
#[must_use]
pub fn selection_for(outcome: &CommandOutcome<'_>) -> SelectionUpdate {
    use SelectionDirective::{Clear, Keep, Select};

    match *outcome {
        CommandOutcome::CollectionAdded { id } => SelectionUpdate {
            collection: Select(id.to_string()),
            request: Clear,
        },
        CommandOutcome::CollectionDeleted => SelectionUpdate {
            collection: Clear,
            request: Clear,
        },
        CommandOutcome::RequestAdded {
            collection_id,
            request_id,
        }
        | CommandOutcome::RequestRenamed {
            collection_id,
            request_id,
        } => SelectionUpdate {
            collection: Select(collection_id.to_string()),
            request: Select(request_id.to_string()),
        },
        CommandOutcome::RequestDeleted { collection_id } => SelectionUpdate {
            collection: Select(collection_id.to_string()),
            request: Clear,
        },
        CommandOutcome::CollectionRenamed
        | CommandOutcome::RequestUpdated
        | CommandOutcome::Listed => SelectionUpdate {
            collection: Keep,
            request: Keep,
        },
    }
}

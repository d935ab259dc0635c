//! Pure mutation operations over the collection list.
//!
//! Every operation takes the list by value and returns a new one; there
//! is no hidden state beyond what is passed in and returned. The caller
//! (the command router) owns loading the list from storage and writing
//! the result back.

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use crate::request::StoredRequest;

/// Creates a collection with the given name and appends it to the list.
///
/// # Errors
///
/// Returns [`StoreError::InvalidName`] when `name` is empty.
pub fn add_collection(
    mut list: Vec<Collection>,
    name: &str,
) -> StoreResult<(Vec<Collection>, Collection)> {
    validate_name(name)?;
    let collection = Collection::new(name);
    list.push(collection.clone());
    Ok((list, collection))
}

/// Replaces the name of the collection with the given id.
///
/// All other fields and the list order are preserved.
///
/// # Errors
///
/// Returns [`StoreError::CollectionNotFound`] when no collection has
/// `id`, or [`StoreError::InvalidName`] when `new_name` is empty.
pub fn rename_collection(
    mut list: Vec<Collection>,
    id: &str,
    new_name: &str,
) -> StoreResult<Vec<Collection>> {
    let collection = find_collection(&mut list, id)?;
    validate_name(new_name)?;
    collection.name = new_name.to_string();
    Ok(list)
}

/// Removes the collection with the given id, along with all of its
/// requests. Deletion is idempotent: an unknown id leaves the list
/// unchanged.
#[must_use]
pub fn delete_collection(mut list: Vec<Collection>, id: &str) -> Vec<Collection> {
    list.retain(|c| c.id != id);
    list
}

/// Creates a request with the default fields and appends it to the
/// collection's request list.
///
/// # Errors
///
/// Returns [`StoreError::CollectionNotFound`] when `collection_id` does
/// not resolve, or [`StoreError::InvalidName`] when `name` is empty.
pub fn add_request(
    mut list: Vec<Collection>,
    collection_id: &str,
    name: &str,
) -> StoreResult<(Vec<Collection>, StoredRequest)> {
    let collection = find_collection(&mut list, collection_id)?;
    validate_name(name)?;
    let request = StoredRequest::new(name);
    collection.requests.push(request.clone());
    Ok((list, request))
}

/// Replaces the name of a request; every other field is untouched.
///
/// # Errors
///
/// Returns [`StoreError::CollectionNotFound`] or
/// [`StoreError::RequestNotFound`] when either id does not resolve, or
/// [`StoreError::InvalidName`] when `new_name` is empty.
pub fn rename_request(
    mut list: Vec<Collection>,
    collection_id: &str,
    request_id: &str,
    new_name: &str,
) -> StoreResult<Vec<Collection>> {
    let collection = find_collection(&mut list, collection_id)?;
    let request = collection
        .request_mut(request_id)
        .ok_or_else(|| StoreError::RequestNotFound(request_id.to_string()))?;
    validate_name(new_name)?;
    request.name = new_name.to_string();
    Ok(list)
}

/// Removes a request from its collection. Idempotent: an unknown
/// collection or request id leaves the list unchanged.
#[must_use]
pub fn delete_request(
    mut list: Vec<Collection>,
    collection_id: &str,
    request_id: &str,
) -> Vec<Collection> {
    if let Some(collection) = list.iter_mut().find(|c| c.id == collection_id) {
        collection.requests.retain(|r| r.id != request_id);
    }
    list
}

/// Replaces the request matching `request.id` wholesale within the
/// given collection, leaving other requests and collections untouched.
///
/// An unknown request id within an existing collection is a silent
/// no-op.
///
/// # Errors
///
/// Returns [`StoreError::CollectionNotFound`] when `collection_id` does
/// not resolve.
pub fn update_request(
    mut list: Vec<Collection>,
    collection_id: &str,
    request: StoredRequest,
) -> StoreResult<Vec<Collection>> {
    let collection = find_collection(&mut list, collection_id)?;
    if let Some(slot) = collection.request_mut(&request.id) {
        *slot = request;
    }
    Ok(list)
}

fn find_collection<'a>(
    list: &'a mut [Collection],
    id: &str,
) -> StoreResult<&'a mut Collection> {
    list.iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| StoreError::CollectionNotFound(id.to_string()))
}

fn validate_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidName);
    }
    Ok(())
}

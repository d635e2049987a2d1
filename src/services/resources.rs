//! The persistence steps every resource handler shares.

use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde_json::Value;

use crate::db::{DocumentStore, StoreError};
use crate::error::{ApiError, StoreResultExt};
use crate::models::object_id;
use crate::models::schema::Schema;

pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Decodes an identifier taken from the request path.
pub fn path_id(text: &str) -> Result<ObjectId, ApiError> {
    object_id::decode(text).map_err(|_| ApiError::InvalidIdentifier("ID"))
}

/// Inserts a validated record and returns the stored document.
pub async fn insert<S: Schema>(
    store: &dyn DocumentStore,
    record: &S,
    failure: &'static str,
) -> Result<Document, ApiError> {
    let doc = bson::to_document(record)
        .map_err(StoreError::from)
        .or_fault(failure)?;
    let id = store.insert_one(S::COLLECTION, doc).await.or_fault(failure)?;
    store
        .find_one(S::COLLECTION, by_id(id))
        .await
        .and_then(|found| found.ok_or(StoreError::MissingAfterInsert(id)))
        .or_fault(failure)
}

pub async fn find_all<S: Schema>(
    store: &dyn DocumentStore,
    filter: Document,
    failure: &'static str,
) -> Result<Vec<Document>, ApiError> {
    store.find(S::COLLECTION, filter).await.or_fault(failure)
}

pub async fn find_by_id<S: Schema>(
    store: &dyn DocumentStore,
    id: ObjectId,
    failure: &'static str,
) -> Result<Document, ApiError> {
    store
        .find_one(S::COLLECTION, by_id(id))
        .await
        .or_fault(failure)?
        .ok_or(ApiError::NotFound(S::ENTITY))
}

/// Merges `patch` into the document and returns the result. An empty patch
/// performs no write.
pub async fn update_by_id<S: Schema>(
    store: &dyn DocumentStore,
    id: ObjectId,
    patch: Document,
    failure: &'static str,
) -> Result<Document, ApiError> {
    if !patch.is_empty() {
        let outcome = store
            .update_one(S::COLLECTION, by_id(id), patch)
            .await
            .or_fault(failure)?;
        if outcome.matched == 0 {
            return Err(ApiError::NotFound(S::ENTITY));
        }
    }
    find_by_id::<S>(store, id, failure).await
}

pub async fn delete_by_id<S: Schema>(
    store: &dyn DocumentStore,
    id: ObjectId,
    failure: &'static str,
) -> Result<(), ApiError> {
    let deleted = store
        .delete_one(S::COLLECTION, by_id(id))
        .await
        .or_fault(failure)?;
    if deleted == 0 {
        return Err(ApiError::NotFound(S::ENTITY));
    }
    Ok(())
}

pub fn render_all<S: Schema>(docs: &[Document]) -> Vec<Value> {
    docs.iter().map(S::render).collect()
}

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Document};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("stored document could not be decoded: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("document could not be encoded: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("inserted document was not assigned an ObjectId")]
    UnexpectedId,

    #[error("document {0} vanished after insert")]
    MissingAfterInsert(ObjectId),

    #[error("unsupported filter on {field}: {reason}")]
    UnsupportedFilter { field: String, reason: String },
}

/// What an update reported; only whether a document matched matters here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
}

/// Schemaless document persistence grouped into named collections.
///
/// Filters use the MongoDB query language; implementations must support at
/// least equality, `$regex` with the `i` option, `$gte` and `$lte`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<ObjectId, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    /// Applies `set` as a `$set` update to the first document matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Returns the number of removed documents (0 or 1).
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

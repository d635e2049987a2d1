use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use regex::RegexBuilder;
use tokio::sync::RwLock;

use crate::db::store::{DocumentStore, StoreError, UpdateOutcome};

/// Process-local store used by the test-suite and for running without MongoDB.
///
/// Collections keep insertion order, like a freshly created MongoDB
/// collection scanned without an index.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<ObjectId, StoreError> {
        let id = match doc.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            Some(_) => return Err(StoreError::UnexpectedId),
            None => {
                let id = ObjectId::new();
                doc.insert("_id", id);
                id
            }
        };
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(doc);
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        for doc in collections.get(collection).into_iter().flatten() {
            if matches(doc, &filter)? {
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut found = Vec::new();
        for doc in collections.get(collection).into_iter().flatten() {
            if matches(doc, &filter)? {
                found.push(doc.clone());
            }
        }
        Ok(found)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        for doc in docs.iter_mut() {
            if matches(doc, &filter)? {
                for (key, value) in set {
                    doc.insert(key, value);
                }
                return Ok(UpdateOutcome { matched: 1 });
            }
        }
        Ok(UpdateOutcome::default())
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        for index in 0..docs.len() {
            if matches(&docs[index], &filter)? {
                docs.remove(index);
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn matches(doc: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (field, condition) in filter {
        let value = doc.get(field);
        let satisfied = match condition {
            Bson::Document(ops) if ops.keys().all(|k| k.starts_with('$')) => {
                evaluate(field, value, ops)?
            }
            expected => equals(value, expected),
        };
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn evaluate(field: &str, value: Option<&Bson>, ops: &Document) -> Result<bool, StoreError> {
    for (op, operand) in ops {
        let satisfied = match op.as_str() {
            "$eq" => equals(value, operand),
            "$ne" => !equals(value, operand),
            "$gte" => compare(value, operand).is_some_and(|o| o.is_ge()),
            "$lte" => compare(value, operand).is_some_and(|o| o.is_le()),
            "$gt" => compare(value, operand).is_some_and(|o| o.is_gt()),
            "$lt" => compare(value, operand).is_some_and(|o| o.is_lt()),
            "$regex" => regex_match(field, value, operand, ops.get_str("$options").unwrap_or(""))?,
            "$options" => true,
            other => {
                return Err(StoreError::UnsupportedFilter {
                    field: field.to_string(),
                    reason: format!("operator {other}"),
                })
            }
        };
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn regex_match(
    field: &str,
    value: Option<&Bson>,
    pattern: &Bson,
    options: &str,
) -> Result<bool, StoreError> {
    let Bson::String(pattern) = pattern else {
        return Err(StoreError::UnsupportedFilter {
            field: field.to_string(),
            reason: "$regex expects a string pattern".to_string(),
        });
    };
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .build()
        .map_err(|err| StoreError::UnsupportedFilter {
            field: field.to_string(),
            reason: err.to_string(),
        })?;
    Ok(matches!(value, Some(Bson::String(text)) if regex.is_match(text)))
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

fn compare(value: Option<&Bson>, operand: &Bson) -> Option<std::cmp::Ordering> {
    let value = value?;
    if let (Some(a), Some(b)) = (as_number(value), as_number(operand)) {
        return a.partial_cmp(&b);
    }
    match (value, operand) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn equals(value: Option<&Bson>, expected: &Bson) -> bool {
    match (value, expected) {
        (None | Some(Bson::Null), Bson::Null) => true,
        (None, _) => false,
        (Some(value), expected) => match (as_number(value), as_number(expected)) {
            (Some(a), Some(b)) => a == b,
            _ => value == expected,
        },
    }
}

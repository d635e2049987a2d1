//! Normalization applied to raw JSON bodies before schema validation or a
//! merge-patch update.

use mongodb::bson::{self, Bson, Document};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::object_id;
use crate::models::schema::ValidationError;

pub fn into_document(body: Value) -> Result<Document, ApiError> {
    match body {
        Value::Object(map) => bson::to_document(&map)
            .map_err(|err| ApiError::BadRequest(format!("Invalid request body: {err}"))),
        _ => Err(ValidationError::NotAnObject.into()),
    }
}

/// Drops the identifier so that an update can never rewrite it.
pub fn strip_id(doc: &mut Document) {
    doc.remove("_id");
}

/// Joins arrays of strings with `,` for fields stored as delimited text.
pub fn join_list_fields(doc: &mut Document, fields: &[&str]) {
    for field in fields {
        let joined = match doc.get(*field) {
            Some(Bson::Array(items)) => items
                .iter()
                .map(|item| item.as_str())
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(",")),
            _ => None,
        };
        if let Some(joined) = joined {
            doc.insert(*field, joined);
        }
    }
}

/// Replaces the hex text in `field` with a native ObjectId.
///
/// Absent fields and `null` are left alone; any other non-identifier value is
/// an error.
pub fn coerce_id_field(doc: &mut Document, field: &'static str) -> Result<(), ApiError> {
    let id = match doc.get(field) {
        None | Some(Bson::Null) | Some(Bson::ObjectId(_)) => return Ok(()),
        Some(Bson::String(text)) => {
            object_id::decode(text).map_err(|_| ApiError::InvalidIdentifier(field))?
        }
        Some(_) => return Err(ApiError::InvalidIdentifier(field)),
    };
    doc.insert(field, id);
    Ok(())
}

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Length of the textual form of an ObjectId (12 bytes, two hex digits each).
const HEX_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier format: {0:?}")]
pub struct InvalidIdFormat(pub String);

pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// Parses the 24-digit hex form of an ObjectId.
///
/// The text is checked before it is handed to the bson parser so that every
/// malformed input surfaces as [`InvalidIdFormat`].
pub fn decode(text: &str) -> Result<ObjectId, InvalidIdFormat> {
    if text.len() != HEX_LEN || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InvalidIdFormat(text.to_string()));
    }
    ObjectId::parse_str(text).map_err(|_| InvalidIdFormat(text.to_string()))
}

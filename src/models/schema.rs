//! Declarative field tables shared by every entity.
//!
//! Each entity record implements [`Schema`] by listing its fields once. Loading
//! walks that table to reject unknown fields, check required fields and coerce
//! values, then hands the cleaned document to serde. Dumping walks the same
//! table to produce the public JSON shape.

use std::sync::OnceLock;

use chrono::SecondsFormat;
use mongodb::bson::{self, Bson, Document};
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::object_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Str,
    Int,
    Float,
    Email,
    ObjectId,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Accepted on load and emitted on dump.
    Both,
    /// Server-assigned; emitted on dump, rejected on load.
    ReadOnly,
    /// Accepted on load, never emitted on dump.
    WriteOnly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Str(&'static str),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    pub nullable: bool,
    pub default: Option<FieldDefault>,
    pub visibility: Visibility,
}

impl Field {
    const fn new(name: &'static str, kind: Kind, required: bool, visibility: Visibility) -> Self {
        Field {
            name,
            kind,
            required,
            nullable: false,
            default: None,
            visibility,
        }
    }

    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, true, Visibility::Both)
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, false, Visibility::Both)
    }

    pub const fn read_only(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, false, Visibility::ReadOnly)
    }

    pub const fn write_only(self) -> Self {
        Field {
            visibility: Visibility::WriteOnly,
            ..self
        }
    }

    pub const fn nullable(self) -> Self {
        Field {
            nullable: true,
            ..self
        }
    }

    pub const fn with_default(self, default: FieldDefault) -> Self {
        Field {
            default: Some(default),
            ..self
        }
    }

    fn loadable(&self) -> bool {
        self.visibility != Visibility::ReadOnly
    }

    fn dumpable(&self) -> bool {
        self.visibility != Visibility::WriteOnly
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Request body must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// The offending field, when the failure concerns a single one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field)
            | ValidationError::UnknownField(field)
            | ValidationError::InvalidField { field, .. } => Some(field),
            ValidationError::NotAnObject => None,
        }
    }

    fn invalid(field: &Field, reason: &str) -> Self {
        ValidationError::InvalidField {
            field: field.name.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub trait Schema: Serialize + DeserializeOwned {
    /// Human name used in messages such as "Client not found".
    const ENTITY: &'static str;
    const COLLECTION: &'static str;
    const FIELDS: &'static [Field];

    /// Validates a payload whose foreign identifiers are already native ObjectIds.
    fn load(payload: Document) -> Result<Self, ValidationError> {
        let cleaned = validate(Self::FIELDS, payload)?;
        bson::from_document(cleaned).map_err(|err| ValidationError::InvalidField {
            field: Self::ENTITY.to_string(),
            reason: err.to_string(),
        })
    }

    /// Public representation of a stored document.
    fn render(doc: &Document) -> Value {
        render(Self::FIELDS, doc)
    }
}

/// Checks `payload` against `fields` and returns the coerced document.
pub fn validate(fields: &[Field], payload: Document) -> Result<Document, ValidationError> {
    for key in payload.keys() {
        if !fields.iter().any(|f| f.name == key && f.loadable()) {
            return Err(ValidationError::UnknownField(key.clone()));
        }
    }

    if let Some(missing) = fields
        .iter()
        .find(|f| f.required && f.loadable() && !payload.contains_key(f.name))
    {
        return Err(ValidationError::MissingField(missing.name.to_string()));
    }

    let mut cleaned = Document::new();
    for field in fields.iter().filter(|f| f.loadable()) {
        match payload.get(field.name) {
            Some(value) => {
                cleaned.insert(field.name, coerce(field, value)?);
            }
            None => match field.default {
                Some(FieldDefault::Str(text)) => {
                    cleaned.insert(field.name, text);
                }
                Some(FieldDefault::Null) => {
                    cleaned.insert(field.name, Bson::Null);
                }
                None => {}
            },
        }
    }
    Ok(cleaned)
}

fn coerce(field: &Field, value: &Bson) -> Result<Bson, ValidationError> {
    if let Bson::Null = value {
        return if field.nullable {
            Ok(Bson::Null)
        } else {
            Err(ValidationError::invalid(field, "Field may not be null."))
        };
    }

    match field.kind {
        Kind::Str => match value {
            Bson::String(s) => Ok(Bson::String(s.clone())),
            _ => Err(ValidationError::invalid(field, "Not a valid string.")),
        },
        Kind::Email => match value {
            Bson::String(s) if is_valid_email(s) => Ok(Bson::String(s.clone())),
            _ => Err(ValidationError::invalid(field, "Not a valid email address.")),
        },
        Kind::Int => coerce_int(value)
            .map(Bson::Int64)
            .ok_or_else(|| ValidationError::invalid(field, "Not a valid integer.")),
        Kind::Float => coerce_float(value)
            .map(Bson::Double)
            .ok_or_else(|| ValidationError::invalid(field, "Not a valid number.")),
        Kind::ObjectId => match value {
            Bson::ObjectId(id) => Ok(Bson::ObjectId(*id)),
            _ => Err(ValidationError::invalid(field, "Not a valid identifier.")),
        },
        Kind::DateTime => match value {
            Bson::DateTime(dt) => Ok(Bson::DateTime(*dt)),
            _ => Err(ValidationError::invalid(field, "Not a valid datetime.")),
        },
    }
}

fn coerce_int(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        Bson::Double(f)
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
        {
            Some(*f as i64)
        }
        Bson::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_float(value: &Bson) -> Option<f64> {
    let number = match value {
        Bson::Int32(n) => f64::from(*n),
        Bson::Int64(n) => *n as f64,
        Bson::Double(f) => *f,
        Bson::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
            )
            .expect("email pattern is valid")
        })
        .is_match(email)
}

/// Renders the dumpable fields of `doc` as public JSON.
pub fn render(fields: &[Field], doc: &Document) -> Value {
    let mut out = Map::new();
    for field in fields.iter().filter(|f| f.dumpable()) {
        if let Some(value) = doc.get(field.name) {
            out.insert(field.name.to_string(), to_json(value));
        }
    }
    Value::Object(out)
}

fn to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(object_id::encode(id)),
        Bson::DateTime(dt) => Value::String(
            dt.to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Null => Value::Null,
        other => other.clone().into_relaxed_extjson(),
    }
}

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::schema::{Field, FieldDefault, Kind, Schema};

pub const ANY_TYPE: &str = "All";
pub const ANY_CITY: &str = "Localization";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub rent_type: String,
    pub property_type: String,
    pub city: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Schema for Package {
    const ENTITY: &'static str = "Package";
    const COLLECTION: &'static str = "packages";
    const FIELDS: &'static [Field] = &[
        Field::read_only("_id", Kind::ObjectId),
        Field::optional("rent_type", Kind::Str).with_default(FieldDefault::Str(ANY_TYPE)),
        Field::optional("property_type", Kind::Str).with_default(FieldDefault::Str(ANY_TYPE)),
        Field::optional("city", Kind::Str).with_default(FieldDefault::Str(ANY_CITY)),
        Field::optional("price_min", Kind::Float)
            .nullable()
            .with_default(FieldDefault::Null),
        Field::optional("price_max", Kind::Float)
            .nullable()
            .with_default(FieldDefault::Null),
        Field::read_only("created_at", Kind::DateTime),
        Field::read_only("updated_at", Kind::DateTime),
    ];
}

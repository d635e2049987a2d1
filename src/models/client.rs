use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::schema::{Field, Kind, Schema};

/// Fields that clients may send as arrays; they are stored comma-joined.
pub const LIST_FIELDS: [&str; 2] = ["destinations_preferees", "langues_parlees"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub nom_complet: String,
    pub age: i64,
    pub sexe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations_preferees: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationalite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_voyage_prefere: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_estime: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub langues_parlees: Option<String>,
}

impl Schema for Client {
    const ENTITY: &'static str = "Client";
    const COLLECTION: &'static str = "clients";
    const FIELDS: &'static [Field] = &[
        Field::read_only("_id", Kind::ObjectId),
        Field::required("nom_complet", Kind::Str),
        Field::required("age", Kind::Int),
        Field::required("sexe", Kind::Str),
        Field::optional("profession", Kind::Str),
        Field::optional("destinations_preferees", Kind::Str),
        Field::required("email", Kind::Email),
        Field::optional("telephone", Kind::Str),
        Field::optional("nationalite", Kind::Str),
        Field::optional("type_voyage_prefere", Kind::Str),
        Field::optional("budget_estime", Kind::Float),
        Field::optional("langues_parlees", Kind::Str),
    ];
}

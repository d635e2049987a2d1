use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::schema::{Field, Kind, Schema};

pub const STATUS_CONFIRMED: &str = "confirmed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub client_id: ObjectId,
    pub destination: String,
    pub dates: String,
    pub nombre_personnes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_chambre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_specifiques: Option<String>,
    pub total_frais: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_reservation: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Schema for Reservation {
    const ENTITY: &'static str = "Reservation";
    const COLLECTION: &'static str = "reservations";
    const FIELDS: &'static [Field] = &[
        Field::read_only("_id", Kind::ObjectId),
        Field::required("client_id", Kind::ObjectId),
        Field::required("destination", Kind::Str),
        Field::required("dates", Kind::Str),
        Field::required("nombre_personnes", Kind::Int),
        Field::optional("type_chambre", Kind::Str),
        Field::optional("options_specifiques", Kind::Str),
        Field::required("total_frais", Kind::Float),
        Field::read_only("date_reservation", Kind::DateTime),
        Field::read_only("status", Kind::Str),
    ];
}

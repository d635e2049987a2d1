use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::schema::{Field, Kind, Schema};

/// A client's comment ("avis"), optionally tied to one of their reservations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub client_id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<ObjectId>,
    pub commentaire: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_avis: Option<DateTime>,
}

impl Schema for Review {
    const ENTITY: &'static str = "Review";
    const COLLECTION: &'static str = "avis";
    const FIELDS: &'static [Field] = &[
        Field::read_only("_id", Kind::ObjectId),
        Field::required("client_id", Kind::ObjectId),
        Field::optional("reservation_id", Kind::ObjectId).nullable(),
        Field::required("commentaire", Kind::Str),
        Field::read_only("date_avis", Kind::DateTime),
    ];
}

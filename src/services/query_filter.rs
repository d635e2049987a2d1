//! Translates optional query-string parameters into store filters.

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::object_id;
use crate::models::package::{ANY_CITY, ANY_TYPE};

/// `GET /packages` parameters. Prices stay textual so that a non-numeric
/// value is ignored instead of failing the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct PackageQuery {
    pub rent_type: Option<String>,
    pub property_type: Option<String>,
    pub city: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
}

impl PackageQuery {
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        contains_ignore_case(&mut filter, "rent_type", self.rent_type.as_deref(), ANY_TYPE);
        contains_ignore_case(&mut filter, "property_type", self.property_type.as_deref(), ANY_TYPE);
        contains_ignore_case(&mut filter, "city", self.city.as_deref(), ANY_CITY);
        if let Some(min) = parse_price(self.price_min.as_deref()) {
            filter.insert("price_min", doc! { "$gte": min });
        }
        if let Some(max) = parse_price(self.price_max.as_deref()) {
            filter.insert("price_max", doc! { "$lte": max });
        }
        filter
    }
}

fn contains_ignore_case(filter: &mut Document, field: &str, value: Option<&str>, sentinel: &str) {
    match value {
        Some(text) if !text.is_empty() && text != sentinel => {
            filter.insert(
                field,
                doc! { "$regex": regex::escape(text), "$options": "i" },
            );
        }
        _ => {}
    }
}

fn parse_price(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// `GET /reservations` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ReservationQuery {
    pub client_id: Option<String>,
    pub email: Option<String>,
}

/// How the owning client of the listed reservations is identified.
#[derive(Debug, PartialEq, Eq)]
pub enum ReservationLookup {
    ClientId(ObjectId),
    Email(String),
}

impl ReservationQuery {
    pub fn lookup(&self) -> Result<ReservationLookup, ApiError> {
        let client_id = self.client_id.as_deref().filter(|v| !v.is_empty());
        let email = self.email.as_deref().filter(|v| !v.is_empty());

        match (client_id, email) {
            (Some(id), None) => object_id::decode(id)
                .map(ReservationLookup::ClientId)
                .map_err(|_| ApiError::InvalidIdentifier("client_id")),
            (None, Some(email)) => Ok(ReservationLookup::Email(email.to_string())),
            (None, None) => Err(ApiError::BadRequest(
                "client_id or email query parameter required".to_string(),
            )),
            (Some(_), Some(_)) => Err(ApiError::BadRequest(
                "Provide either client_id or email, not both".to_string(),
            )),
        }
    }
}

pub fn reservations_of(client_id: ObjectId) -> Document {
    doc! { "client_id": client_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package_query(city: Option<&str>) -> PackageQuery {
        PackageQuery {
            city: city.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_parameters_is_unrestricted() {
        assert!(PackageQuery::default().to_filter().is_empty());
    }

    #[test]
    fn test_sentinels_do_not_restrict() {
        let query = PackageQuery {
            rent_type: Some("All".to_string()),
            property_type: Some("All".to_string()),
            city: Some("Localization".to_string()),
            ..Default::default()
        };
        assert!(query.to_filter().is_empty());
    }

    #[test]
    fn test_city_is_a_case_insensitive_substring() {
        let filter = package_query(Some("Paris")).to_filter();
        assert_eq!(
            filter.get_document("city").unwrap(),
            &doc! { "$regex": "Paris", "$options": "i" }
        );
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let filter = package_query(Some("St. Louis (MO)")).to_filter();
        let pattern = filter.get_document("city").unwrap().get_str("$regex").unwrap();
        assert_eq!(pattern, r"St\. Louis \(MO\)");
    }

    #[test]
    fn test_price_bounds() {
        let query = PackageQuery {
            price_min: Some("100".to_string()),
            price_max: Some("250.5".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.get_document("price_min").unwrap(), &doc! { "$gte": 100.0 });
        assert_eq!(filter.get_document("price_max").unwrap(), &doc! { "$lte": 250.5 });
    }

    #[test]
    fn test_non_numeric_price_is_ignored() {
        let query = PackageQuery {
            price_min: Some("cheap".to_string()),
            ..Default::default()
        };
        assert!(query.to_filter().is_empty());
    }

    #[test]
    fn test_reservation_lookup_requires_exactly_one_parameter() {
        let neither = ReservationQuery::default();
        assert!(matches!(neither.lookup(), Err(ApiError::BadRequest(_))));

        let both = ReservationQuery {
            client_id: Some(ObjectId::new().to_hex()),
            email: Some("a@b.com".to_string()),
        };
        assert!(matches!(both.lookup(), Err(ApiError::BadRequest(_))));

        let empty = ReservationQuery {
            client_id: Some(String::new()),
            email: Some("a@b.com".to_string()),
        };
        assert_eq!(
            empty.lookup().unwrap(),
            ReservationLookup::Email("a@b.com".to_string())
        );
    }

    #[test]
    fn test_reservation_lookup_decodes_client_id() {
        let id = ObjectId::new();
        let query = ReservationQuery {
            client_id: Some(id.to_hex()),
            email: None,
        };
        assert_eq!(query.lookup().unwrap(), ReservationLookup::ClientId(id));

        let bad = ReservationQuery {
            client_id: Some("nope".to_string()),
            email: None,
        };
        assert!(matches!(
            bad.lookup(),
            Err(ApiError::InvalidIdentifier("client_id"))
        ));
    }
}

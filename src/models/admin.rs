use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    object_id,
    schema::{Field, Kind, Schema},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    /// Plain text right after `load`; a bcrypt hash once persisted.
    pub mot_de_passe: String,
}

impl Schema for Admin {
    const ENTITY: &'static str = "Admin";
    const COLLECTION: &'static str = "admins";
    const FIELDS: &'static [Field] = &[
        Field::read_only("_id", Kind::ObjectId),
        Field::required("email", Kind::Email),
        Field::required("mot_de_passe", Kind::Str).write_only(),
    ];
}

/// The admin block returned by the dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminSummary {
    pub id: String,
    pub email: String,
}

impl From<&Admin> for AdminSummary {
    fn from(admin: &Admin) -> Self {
        AdminSummary {
            id: admin.id.as_ref().map(object_id::encode).unwrap_or_default(),
            email: admin.email.clone(),
        }
    }
}

/// Login body. Values stay untyped so that a wrong JSON type is just another
/// failed login rather than a malformed request.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub mot_de_passe: Option<Value>,
}

impl LoginRequest {
    /// Email and password, when both are present as strings.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_ref()?.as_str()?;
        let password = self.mot_de_passe.as_ref()?.as_str()?;
        Some((email, password))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_credentials_require_two_strings() {
        let login: LoginRequest =
            serde_json::from_str(r#"{"email": "a@b.com", "mot_de_passe": "pw"}"#).unwrap();
        assert_eq!(login.credentials(), Some(("a@b.com", "pw")));

        for body in [
            r#"{"email": 123, "mot_de_passe": "pw"}"#,
            r#"{"email": ["a@b.com"], "mot_de_passe": "pw"}"#,
            r#"{"email": "a@b.com", "mot_de_passe": null}"#,
            r#"{"email": "a@b.com"}"#,
            "{}",
        ] {
            let login: LoginRequest = serde_json::from_str(body).unwrap();
            assert_eq!(login.credentials(), None, "{body}");
        }
    }

    #[test]
    fn test_password_is_never_rendered() {
        let admin = Admin {
            id: Some(ObjectId::new()),
            email: "admin@example.com".to_string(),
            mot_de_passe: "$2b$04$hash".to_string(),
        };
        let json = Admin::render(&bson::to_document(&admin).unwrap());
        assert_eq!(json["email"], "admin@example.com");
        assert!(json.get("mot_de_passe").is_none());
    }

    #[test]
    fn test_load_accepts_password() {
        let admin = Admin::load(doc! { "email": "admin@example.com", "mot_de_passe": "secret" })
            .unwrap();
        assert_eq!(admin.mot_de_passe, "secret");
    }
}

#![allow(dead_code, unused_macros)]

use actix_web::{web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use voyage_api::context::AppContext;
use voyage_api::db::memory::MemoryStore;
use voyage_api::routes;
use voyage_api::services::admin_accounts::{self, PasswordVerifier};
use voyage_api::services::token_service::TokenService;

pub const JWT_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "Admin123";
/// Cheap cost shared by seeded admins and the login dummy hash.
pub const BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub context: web::Data<AppContext>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let context = web::Data::new(AppContext::new(
            store.clone(),
            TokenService::new(JWT_SECRET, 15),
            PasswordVerifier::new(BCRYPT_COST),
        ));
        Self { store, context }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.context.clone())
            .configure(routes::configure)
    }

    pub async fn seed_admin(&self) {
        admin_accounts::create_admin(
            self.store.as_ref(),
            ADMIN_EMAIL,
            ADMIN_PASSWORD,
            BCRYPT_COST,
        )
        .await
        .expect("seed admin");
    }
}

/// Creates a client through the API and evaluates to its id.
macro_rules! create_client {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/clients")
            .set_json($crate::common::client_payload($email))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["_id"].as_str().unwrap().to_string()
    }};
}

pub fn client_payload(email: &str) -> Value {
    json!({
        "nom_complet": "A B",
        "age": 30,
        "sexe": "M",
        "email": email,
    })
}

pub fn reservation_payload(client_id: &str) -> Value {
    json!({
        "client_id": client_id,
        "destination": "Lisbon",
        "dates": "2025-06-01/2025-06-08",
        "nombre_personnes": 2,
        "total_frais": 1800.0,
    })
}

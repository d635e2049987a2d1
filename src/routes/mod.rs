use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::auth::AuthMiddleware;

pub mod admin;
pub mod clients;
pub mod health;
pub mod packages;
pub mod reservations;
pub mod reviews;

async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to the API!" }))
}

/// Registers every route; shared by the server binary and the test-suite.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .route("", web::get().to(index))
            .route("/", web::get().to(index))
            .service(
                web::scope("/clients")
                    .route("", web::post().to(clients::create))
                    .route("", web::get().to(clients::list))
                    .route("/{id}", web::get().to(clients::get_by_id))
                    .route("/{id}", web::put().to(clients::update))
                    .route("/{id}", web::delete().to(clients::delete)),
            )
            .service(
                web::scope("/reservations")
                    .route("", web::post().to(reservations::create))
                    .route("", web::get().to(reservations::list))
                    .route("/{id}", web::get().to(reservations::get_by_id))
                    .route("/{id}", web::put().to(reservations::update))
                    .route("/{id}", web::delete().to(reservations::delete)),
            )
            .service(
                web::scope("/avis")
                    .route("", web::post().to(reviews::create))
                    .route("", web::get().to(reviews::list))
                    .route("/{id}", web::delete().to(reviews::delete)),
            )
            .service(
                web::scope("/packages")
                    .route("", web::get().to(packages::list))
                    .route("/{id}", web::get().to(packages::get_by_id))
                    // Protected routes
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware)
                            .route("", web::post().to(packages::create))
                            .route("/{id}", web::put().to(packages::update))
                            .route("/{id}", web::delete().to(packages::delete)),
                    ),
            )
            .service(
                web::scope("/admin")
                    .route("/login", web::post().to(admin::login))
                    // Protected routes
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware)
                            .route("/dashboard", web::get().to(admin::dashboard))
                            .route(
                                "/reservations/{id}/confirm",
                                web::post().to(admin::confirm_reservation),
                            ),
                    ),
            ),
    );
}

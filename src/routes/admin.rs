use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::json;

use crate::context::AppContext;
use crate::error::{ApiError, StoreResultExt};
use crate::middleware::auth_context::AuthenticatedAdmin;
use crate::models::admin::{AdminSummary, LoginRequest, TokenResponse};
use crate::models::client::Client;
use crate::models::object_id;
use crate::models::package::Package;
use crate::models::reservation::{Reservation, STATUS_CONFIRMED};
use crate::models::review::Review;
use crate::models::schema::Schema;
use crate::services::{admin_accounts, resources};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_ADMIN: &str = "Invalid admin ID in token";

/*
    POST /api/admin/login
*/
pub async fn login(
    ctx: web::Data<AppContext>,
    input: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    // Missing or non-string credentials go down the unknown-admin path.
    let credentials = input.credentials();
    let admin = match credentials {
        Some((email, _)) => admin_accounts::find_by_email(ctx.store(), email)
            .await
            .or_fault("Failed to process login")?,
        None => None,
    };
    let password = credentials.map_or("", |(_, password)| password);

    let verified = ctx.passwords.verify(admin.as_ref(), password);
    let Some(admin_id) = admin.filter(|_| verified).and_then(|admin| admin.id) else {
        log::warn!("Failed admin login for {:?}", input.email);
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    };

    let access_token = ctx.tokens.issue(&admin_id).map_err(|err| {
        log::error!("Token generation failed: {}", err);
        ApiError::BadRequest("Token generation failed".to_string())
    })?;
    Ok(HttpResponse::Ok().json(TokenResponse { access_token }))
}

/*
    GET /api/admin/dashboard (admin)
*/
pub async fn dashboard(
    ctx: web::Data<AppContext>,
    admin: AuthenticatedAdmin,
) -> Result<HttpResponse, ApiError> {
    const FAILURE: &str = "Failed to load dashboard";

    let admin_id = object_id::decode(&admin.admin_id)
        .map_err(|_| ApiError::Unauthorized(INVALID_ADMIN))?;
    let admin = admin_accounts::find_by_id(ctx.store(), admin_id)
        .await
        .or_fault(FAILURE)?
        .ok_or(ApiError::Unauthorized(INVALID_ADMIN))?;

    let store = ctx.store();
    let (clients, reservations, reviews, packages) = futures::try_join!(
        resources::find_all::<Client>(store, doc! {}, FAILURE),
        resources::find_all::<Reservation>(store, doc! {}, FAILURE),
        resources::find_all::<Review>(store, doc! {}, FAILURE),
        resources::find_all::<Package>(store, doc! {}, FAILURE),
    )?;

    Ok(HttpResponse::Ok().json(json!({
        "admin": AdminSummary::from(&admin),
        "clients": resources::render_all::<Client>(&clients),
        "reservations": resources::render_all::<Reservation>(&reservations),
        "avis": resources::render_all::<Review>(&reviews),
        "packages": resources::render_all::<Package>(&packages),
    })))
}

/*
    POST /api/admin/reservations/{id}/confirm (admin)
*/
pub async fn confirm_reservation(
    ctx: web::Data<AppContext>,
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let outcome = ctx
        .store()
        .update_one(
            Reservation::COLLECTION,
            resources::by_id(id),
            doc! { "status": STATUS_CONFIRMED },
        )
        .await
        .or_fault("Failed to confirm reservation")?;
    if outcome.matched == 0 {
        return Err(ApiError::NotFound(Reservation::ENTITY));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Reservation confirmed." })))
}

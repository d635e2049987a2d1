use actix_web::{web, HttpResponse};
use mongodb::bson::{doc, DateTime};
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, StoreResultExt};
use crate::models::client::Client;
use crate::models::reservation::Reservation;
use crate::models::schema::Schema;
use crate::services::query_filter::{self, ReservationLookup, ReservationQuery};
use crate::services::{payload, resources};

/*
    POST /api/reservations
*/
pub async fn create(
    ctx: web::Data<AppContext>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let mut doc = payload::into_document(body.into_inner())?;
    payload::coerce_id_field(&mut doc, "client_id")?;

    let mut reservation = Reservation::load(doc)?;
    reservation.date_reservation = Some(DateTime::now());

    let stored =
        resources::insert(ctx.store(), &reservation, "Failed to create reservation").await?;
    Ok(HttpResponse::Created().json(Reservation::render(&stored)))
}

/*
    GET /api/reservations?client_id=...
    GET /api/reservations?email=...
*/
pub async fn list(
    ctx: web::Data<AppContext>,
    query: web::Query<ReservationQuery>,
) -> Result<HttpResponse, ApiError> {
    let client_id = match query.lookup()? {
        ReservationLookup::ClientId(id) => id,
        ReservationLookup::Email(email) => {
            let client = ctx
                .store()
                .find_one(Client::COLLECTION, doc! { "email": &email })
                .await
                .or_fault("Failed to fetch reservations")?
                .ok_or(ApiError::NotFound(Client::ENTITY))?;
            client
                .get_object_id("_id")
                .map_err(|_| ApiError::NotFound(Client::ENTITY))?
        }
    };

    let reservations = resources::find_all::<Reservation>(
        ctx.store(),
        query_filter::reservations_of(client_id),
        "Failed to fetch reservations",
    )
    .await?;
    Ok(HttpResponse::Ok().json(resources::render_all::<Reservation>(&reservations)))
}

/*
    GET /api/reservations/{id}
*/
pub async fn get_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let reservation =
        resources::find_by_id::<Reservation>(ctx.store(), id, "Failed to fetch reservation")
            .await?;
    Ok(HttpResponse::Ok().json(Reservation::render(&reservation)))
}

/*
    PUT /api/reservations/{id}
*/
pub async fn update(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let mut patch = payload::into_document(body.into_inner())?;
    payload::strip_id(&mut patch);
    payload::coerce_id_field(&mut patch, "client_id")?;

    let reservation = resources::update_by_id::<Reservation>(
        ctx.store(),
        id,
        patch,
        "Failed to update reservation",
    )
    .await?;
    Ok(HttpResponse::Ok().json(Reservation::render(&reservation)))
}

/*
    DELETE /api/reservations/{id}
*/
pub async fn delete(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    resources::delete_by_id::<Reservation>(ctx.store(), id, "Failed to delete reservation")
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Reservation deleted" })))
}

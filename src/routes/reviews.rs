use actix_web::{web, HttpResponse};
use mongodb::bson::{doc, DateTime};
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::review::Review;
use crate::models::schema::Schema;
use crate::services::{payload, resources};

/*
    POST /api/avis
*/
pub async fn create(
    ctx: web::Data<AppContext>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let mut doc = payload::into_document(body.into_inner())?;
    payload::coerce_id_field(&mut doc, "client_id")?;
    payload::coerce_id_field(&mut doc, "reservation_id")?;

    let mut review = Review::load(doc)?;
    review.date_avis = Some(DateTime::now());

    let stored = resources::insert(ctx.store(), &review, "Failed to create review").await?;
    Ok(HttpResponse::Created().json(Review::render(&stored)))
}

/*
    GET /api/avis
*/
pub async fn list(ctx: web::Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let reviews =
        resources::find_all::<Review>(ctx.store(), doc! {}, "Failed to fetch reviews").await?;
    Ok(HttpResponse::Ok().json(resources::render_all::<Review>(&reviews)))
}

/*
    DELETE /api/avis/{id}
*/
pub async fn delete(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    resources::delete_by_id::<Review>(ctx.store(), id, "Failed to delete review").await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Review deleted" })))
}

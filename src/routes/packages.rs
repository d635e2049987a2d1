use actix_web::{web, HttpResponse};
use mongodb::bson::DateTime;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::middleware::auth_context::AuthenticatedAdmin;
use crate::models::package::Package;
use crate::models::schema::Schema;
use crate::services::query_filter::PackageQuery;
use crate::services::{payload, resources};

/*
    GET /api/packages?rent_type=&property_type=&city=&price_min=&price_max=
*/
pub async fn list(
    ctx: web::Data<AppContext>,
    query: web::Query<PackageQuery>,
) -> Result<HttpResponse, ApiError> {
    let packages =
        resources::find_all::<Package>(ctx.store(), query.to_filter(), "Failed to fetch packages")
            .await?;
    Ok(HttpResponse::Ok().json(resources::render_all::<Package>(&packages)))
}

/*
    GET /api/packages/{id}
*/
pub async fn get_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let package =
        resources::find_by_id::<Package>(ctx.store(), id, "Failed to fetch package").await?;
    Ok(HttpResponse::Ok().json(Package::render(&package)))
}

/*
    POST /api/packages (admin)
*/
pub async fn create(
    ctx: web::Data<AppContext>,
    _admin: AuthenticatedAdmin,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let doc = payload::into_document(body.into_inner())?;
    let mut package = Package::load(doc)?;

    let now = DateTime::now();
    package.created_at = Some(now);
    package.updated_at = Some(now);

    let stored = resources::insert(ctx.store(), &package, "Failed to create package").await?;
    Ok(HttpResponse::Created().json(Package::render(&stored)))
}

/*
    PUT /api/packages/{id} (admin)
*/
pub async fn update(
    ctx: web::Data<AppContext>,
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let mut patch = payload::into_document(body.into_inner())?;
    payload::strip_id(&mut patch);
    patch.insert("updated_at", DateTime::now());

    let package =
        resources::update_by_id::<Package>(ctx.store(), id, patch, "Failed to update package")
            .await?;
    Ok(HttpResponse::Ok().json(Package::render(&package)))
}

/*
    DELETE /api/packages/{id} (admin)
*/
pub async fn delete(
    ctx: web::Data<AppContext>,
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    resources::delete_by_id::<Package>(ctx.store(), id, "Failed to delete package").await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Package deleted successfully" })))
}

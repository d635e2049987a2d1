use actix_web::{web, HttpResponse};
use mongodb::bson::{doc, oid::ObjectId, Bson};
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::db::DocumentStore;
use crate::error::{ApiError, StoreResultExt};
use crate::models::client::{self, Client};
use crate::models::schema::Schema;
use crate::services::{payload, resources};

/*
    POST /api/clients
*/
pub async fn create(
    ctx: web::Data<AppContext>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let mut doc = payload::into_document(body.into_inner())?;
    payload::join_list_fields(&mut doc, &client::LIST_FIELDS);

    let client = Client::load(doc)?;
    ensure_email_available(ctx.store(), &client.email, None).await?;

    let stored = resources::insert(ctx.store(), &client, "Failed to create client").await?;
    Ok(HttpResponse::Created().json(Client::render(&stored)))
}

/*
    GET /api/clients
*/
pub async fn list(ctx: web::Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let clients =
        resources::find_all::<Client>(ctx.store(), doc! {}, "Failed to fetch clients").await?;
    Ok(HttpResponse::Ok().json(resources::render_all::<Client>(&clients)))
}

/*
    GET /api/clients/{id}
*/
pub async fn get_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let client = resources::find_by_id::<Client>(ctx.store(), id, "Failed to fetch client").await?;
    Ok(HttpResponse::Ok().json(Client::render(&client)))
}

/*
    PUT /api/clients/{id}
*/
pub async fn update(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    let mut patch = payload::into_document(body.into_inner())?;
    payload::strip_id(&mut patch);
    payload::join_list_fields(&mut patch, &client::LIST_FIELDS);

    if let Some(Bson::String(email)) = patch.get("email") {
        ensure_email_available(ctx.store(), email, Some(id)).await?;
    }

    let client =
        resources::update_by_id::<Client>(ctx.store(), id, patch, "Failed to update client")
            .await?;
    Ok(HttpResponse::Ok().json(Client::render(&client)))
}

/*
    DELETE /api/clients/{id}
*/
pub async fn delete(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = resources::path_id(&path)?;
    resources::delete_by_id::<Client>(ctx.store(), id, "Failed to delete client").await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Client deleted" })))
}

/// Rejects `email` when a client other than `owner` already uses it.
async fn ensure_email_available(
    store: &dyn DocumentStore,
    email: &str,
    owner: Option<ObjectId>,
) -> Result<(), ApiError> {
    let mut filter = doc! { "email": email };
    if let Some(owner) = owner {
        filter.insert("_id", doc! { "$ne": owner });
    }
    match store
        .find_one(Client::COLLECTION, filter)
        .await
        .or_fault("Failed to check email availability")?
    {
        Some(_) => Err(ApiError::DuplicateEmail),
        None => Ok(()),
    }
}

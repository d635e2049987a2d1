use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::context::AppContext;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    GET /health
*/
pub async fn health_check(ctx: web::Data<AppContext>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store_result = check_document_store(&ctx).await;
    if store_result.status != "ok" {
        health.status = "degraded".to_string();
    }
    health
        .services
        .insert("document_store".to_string(), store_result);

    HttpResponse::Ok().json(health)
}

async fn check_document_store(ctx: &AppContext) -> ServiceStatus {
    match ctx.store().ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Document store reachable".to_string()),
        },
        Err(e) => {
            log::error!("Document store health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach document store: {}", e)),
            }
        }
    }
}

// src/handlers/health.rs
// DOCUMENTATION: Status and statistics handlers
// PURPOSE: Verify service status and report record counts

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::EntityKind;
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

/// GET /status
pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

/// GET /stats
/// Count of records per kind, keyed by table name
pub async fn stats(store: web::Data<dyn EntityStore>) -> Result<impl Responder, PlacesError> {
    let mut counts = Map::new();
    for kind in EntityKind::ALL {
        let count = store.count(kind).await?;
        counts.insert(kind.table().to_string(), Value::from(count));
    }

    Ok(HttpResponse::Ok().json(counts))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status))
        .route("/stats", web::get().to(stats));
}

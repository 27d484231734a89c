// src/handlers/states.rs
// DOCUMENTATION: HTTP handlers for states
// PURPOSE: Parse requests, call services, return responses

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{CreateStateRequest, State};
use crate::services::EntityService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

/// GET /states
pub async fn list_states(
    store: web::Data<dyn EntityStore>,
) -> Result<impl Responder, PlacesError> {
    let states = EntityService::list::<State>(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(states))
}

/// GET /states/{id}
pub async fn get_state(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let state = EntityService::get::<State>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// POST /states
pub async fn create_state(
    store: web::Data<dyn EntityStore>,
    req: web::Json<CreateStateRequest>,
) -> Result<impl Responder, PlacesError> {
    let name = req.into_inner().name.ok_or(PlacesError::MissingField("name"))?;
    let state = EntityService::create(store.get_ref(), State::new(name)).await?;
    Ok(HttpResponse::Created().json(state))
}

/// PUT /states/{id}
pub async fn update_state(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<impl Responder, PlacesError> {
    let state =
        EntityService::update::<State>(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// DELETE /states/{id}
pub async fn delete_state(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    EntityService::delete::<State>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// Configuration for state routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/states", web::get().to(list_states))
        .route("/states", web::post().to(create_state))
        .route("/states/{id}", web::get().to(get_state))
        .route("/states/{id}", web::put().to(update_state))
        .route("/states/{id}", web::delete().to(delete_state));
}

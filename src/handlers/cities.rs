// src/handlers/cities.rs
// DOCUMENTATION: HTTP handlers for cities
// PURPOSE: Parse requests, call services, return responses

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{City, CreateCityRequest};
use crate::services::{CityService, EntityService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

/// GET /states/{state_id}/cities
pub async fn list_cities(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let cities = CityService::cities_of_state(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(cities))
}

/// POST /states/{state_id}/cities
pub async fn create_city(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    req: web::Json<CreateCityRequest>,
) -> Result<impl Responder, PlacesError> {
    let city = CityService::create_city(store.get_ref(), &path, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(city))
}

/// GET /cities/{id}
pub async fn get_city(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let city = EntityService::get::<City>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// PUT /cities/{id}
pub async fn update_city(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<impl Responder, PlacesError> {
    let city = EntityService::update::<City>(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// DELETE /cities/{id}
pub async fn delete_city(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    EntityService::delete::<City>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/states/{state_id}/cities", web::get().to(list_cities))
        .route("/states/{state_id}/cities", web::post().to(create_city))
        .route("/cities/{id}", web::get().to(get_city))
        .route("/cities/{id}", web::put().to(update_city))
        .route("/cities/{id}", web::delete().to(delete_city));
}

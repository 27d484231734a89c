// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{CreatePlaceRequest, Place, PlaceSearchFilter, PlaceSearchRequest};
use crate::services::{EntityService, PlaceSearchService, PlaceService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

/// GET /cities/{city_id}/places
/// List the places of a city
pub async fn list_places(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let places = PlaceService::places_of_city(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// POST /cities/{city_id}/places
/// Create a new place
pub async fn create_place(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    req: web::Json<CreatePlaceRequest>,
) -> Result<impl Responder, PlacesError> {
    let place = PlaceService::create_place(store.get_ref(), &path, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(place))
}

/// GET /places/{id}
pub async fn get_place(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let place = EntityService::get::<Place>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// PUT /places/{id}
/// Update a place; owner and city cannot be changed
pub async fn update_place(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<impl Responder, PlacesError> {
    let place = EntityService::update::<Place>(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// DELETE /places/{id}
pub async fn delete_place(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    EntityService::delete::<Place>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// POST /places_search
/// Search places by states, cities and amenities
pub async fn search_places(
    store: web::Data<dyn EntityStore>,
    req: web::Json<PlaceSearchRequest>,
) -> Result<impl Responder, PlacesError> {
    let filter = PlaceSearchFilter::from(req.into_inner());
    log::info!(
        "Place search: {} states, {} cities, {} amenities",
        filter.states.len(),
        filter.cities.len(),
        filter.amenities.len()
    );

    let places = PlaceSearchService::search(store.get_ref(), &filter).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/cities/{city_id}/places", web::get().to(list_places))
        .route("/cities/{city_id}/places", web::post().to(create_place))
        .route("/places_search", web::post().to(search_places))
        .route("/places/{id}", web::get().to(get_place))
        .route("/places/{id}", web::put().to(update_place))
        .route("/places/{id}", web::delete().to(delete_place));
}

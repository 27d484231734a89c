// src/handlers/amenities.rs
// DOCUMENTATION: HTTP handlers for amenities
// PURPOSE: Parse requests, call services, return responses

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{Amenity, CreateAmenityRequest};
use crate::services::EntityService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

pub async fn list_amenities(
    store: web::Data<dyn EntityStore>,
) -> Result<impl Responder, PlacesError> {
    let amenities = EntityService::list::<Amenity>(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

pub async fn get_amenity(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let amenity = EntityService::get::<Amenity>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

pub async fn create_amenity(
    store: web::Data<dyn EntityStore>,
    req: web::Json<CreateAmenityRequest>,
) -> Result<impl Responder, PlacesError> {
    let name = req.into_inner().name.ok_or(PlacesError::MissingField("name"))?;
    let amenity = EntityService::create(store.get_ref(), Amenity::new(name)).await?;
    Ok(HttpResponse::Created().json(amenity))
}

pub async fn update_amenity(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<impl Responder, PlacesError> {
    let amenity =
        EntityService::update::<Amenity>(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

pub async fn delete_amenity(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    EntityService::delete::<Amenity>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/amenities", web::get().to(list_amenities))
        .route("/amenities", web::post().to(create_amenity))
        .route("/amenities/{id}", web::get().to(get_amenity))
        .route("/amenities/{id}", web::put().to(update_amenity))
        .route("/amenities/{id}", web::delete().to(delete_amenity));
}

// src/handlers/place_amenities.rs
// DOCUMENTATION: HTTP handlers for the Place-Amenity link
// PURPOSE: Works the same on both storage backends

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::services::PlaceService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /places/{place_id}/amenities
pub async fn list_place_amenities(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let amenities = PlaceService::amenities(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /places/{place_id}/amenities/{amenity_id}
/// 201 when the link is new, 200 when it already existed
pub async fn link_place_amenity(
    store: web::Data<dyn EntityStore>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, PlacesError> {
    let (place_id, amenity_id) = path.into_inner();
    let (amenity, created) =
        PlaceService::link_amenity(store.get_ref(), &place_id, &amenity_id).await?;

    if created {
        Ok(HttpResponse::Created().json(amenity))
    } else {
        Ok(HttpResponse::Ok().json(amenity))
    }
}

/// DELETE /places/{place_id}/amenities/{amenity_id}
pub async fn unlink_place_amenity(
    store: web::Data<dyn EntityStore>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, PlacesError> {
    let (place_id, amenity_id) = path.into_inner();
    PlaceService::unlink_amenity(store.get_ref(), &place_id, &amenity_id).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/places/{place_id}/amenities",
        web::get().to(list_place_amenities),
    )
    .route(
        "/places/{place_id}/amenities/{amenity_id}",
        web::post().to(link_place_amenity),
    )
    .route(
        "/places/{place_id}/amenities/{amenity_id}",
        web::delete().to(unlink_place_amenity),
    );
}

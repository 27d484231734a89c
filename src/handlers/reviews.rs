// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for reviews
// PURPOSE: Parse requests, call services, return responses

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{CreateReviewRequest, Review};
use crate::services::{EntityService, ReviewService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

/// GET /places/{place_id}/reviews
pub async fn list_reviews(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let reviews = ReviewService::reviews_of_place(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// POST /places/{place_id}/reviews
pub async fn create_review(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    req: web::Json<CreateReviewRequest>,
) -> Result<impl Responder, PlacesError> {
    let review = ReviewService::create_review(store.get_ref(), &path, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}

pub async fn get_review(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let review = EntityService::get::<Review>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(review))
}

pub async fn update_review(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<impl Responder, PlacesError> {
    let review =
        EntityService::update::<Review>(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

pub async fn delete_review(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    EntityService::delete::<Review>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/places/{place_id}/reviews", web::get().to(list_reviews))
        .route("/places/{place_id}/reviews", web::post().to(create_review))
        .route("/reviews/{id}", web::get().to(get_review))
        .route("/reviews/{id}", web::put().to(update_review))
        .route("/reviews/{id}", web::delete().to(delete_review));
}

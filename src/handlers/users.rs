// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for users
// PURPOSE: Responses go through UserResponse so password hashes stay private

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{CreateUserRequest, User, UserResponse};
use crate::services::{EntityService, UserService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

pub async fn list_users(store: web::Data<dyn EntityStore>) -> Result<impl Responder, PlacesError> {
    let users: Vec<UserResponse> = EntityService::list::<User>(store.get_ref())
        .await?
        .iter()
        .map(User::to_response)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let user = EntityService::get::<User>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

pub async fn create_user(
    store: web::Data<dyn EntityStore>,
    req: web::Json<CreateUserRequest>,
) -> Result<impl Responder, PlacesError> {
    let user = UserService::create_user(store.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(user.to_response()))
}

pub async fn update_user(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<impl Responder, PlacesError> {
    let user = UserService::update_user(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

pub async fn delete_user(
    store: web::Data<dyn EntityStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    EntityService::delete::<User>(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(list_users))
        .route("/users", web::post().to(create_user))
        .route("/users/{id}", web::get().to(get_user))
        .route("/users/{id}", web::put().to(update_user))
        .route("/users/{id}", web::delete().to(delete_user));
}

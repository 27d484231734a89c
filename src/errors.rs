// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every variant maps to one HTTP status code
/// NotFound deliberately carries no response body
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a JSON")]
    NotAJson,

    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl PlacesError {
    /// Shorthand for a not-found error on a typed record
    pub fn not_found(kind: impl std::fmt::Display, id: &str) -> Self {
        PlacesError::NotFound(format!("{}.{}", kind, id))
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: 4xx/5xx bodies are `{"error": "<message>"}`, 404 is empty
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status == StatusCode::NOT_FOUND {
            return HttpResponse::build(status).finish();
        }

        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::NotAJson => StatusCode::BAD_REQUEST,
            PlacesError::MissingField(_) => StatusCode::BAD_REQUEST,
            PlacesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PlacesError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PlacesError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlacesError::not_found("Place", "p1").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(PlacesError::NotAJson.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PlacesError::MissingField("name").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::StorageError("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_rt::test]
    async fn test_missing_field_body() {
        let resp = PlacesError::MissingField("user_id").error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Missing user_id" }));
    }

    #[actix_rt::test]
    async fn test_not_found_has_empty_body() {
        let resp = PlacesError::not_found("State", "nope").error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
    }
}

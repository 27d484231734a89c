// src/models/user.rs
// DOCUMENTATION: User record, request DTO and public response shape
// PURPOSE: Owners of places and authors of reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{new_id, timestamps, EntityKind, Model};

/// Account owning Places and Reviews
/// DOCUMENTATION: `password` always holds a one-way hash, never plaintext;
/// it is persisted with the record but left out of UserResponse
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: String,
    #[validate(length(min = 1, max = 128))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub first_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let (created_at, updated_at) = timestamps();
        User {
            id: new_id(),
            email: email.into(),
            password: password_hash.into(),
            first_name: None,
            last_name: None,
            created_at,
            updated_at,
        }
    }

    /// Convert stored User into API response
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Model for User {
    const KIND: EntityKind = EntityKind::User;
    const PROTECTED_FIELDS: &'static [&'static str] =
        &["id", "created_at", "updated_at", "email"];

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Body of POST /users
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// User DTO exposed via API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_hides_password() {
        let user = User::new("a@b.c", "$argon2id$v=19$hash");
        let value = serde_json::to_value(user.to_response()).unwrap();

        assert_eq!(value["email"], "a@b.c");
        assert!(value.get("password").is_none());
    }
}

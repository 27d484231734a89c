// src/models/review.rs
// DOCUMENTATION: Review record and its request DTO
// PURPOSE: Text a User leaves on a Place

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{new_id, timestamps, EntityKind, Model};

/// A user's review of a place
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Review {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    #[validate(length(max = 1024))]
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let (created_at, updated_at) = timestamps();
        Review {
            id: new_id(),
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
            created_at,
            updated_at,
        }
    }
}

impl Model for Review {
    const KIND: EntityKind = EntityKind::Review;
    const PROTECTED_FIELDS: &'static [&'static str] =
        &["id", "created_at", "updated_at", "user_id", "place_id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Request to create a new review
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub user_id: Option<String>,
    pub text: Option<String>,
}

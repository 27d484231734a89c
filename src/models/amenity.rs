// src/models/amenity.rs
// DOCUMENTATION: Amenity record and its request DTO
// PURPOSE: Features linked to Places and matched by search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use validator::Validate;

use super::base::{new_id, timestamps, EntityKind, Model};

/// Something a Place offers (wifi, pool, ...); many-to-many with Place
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Amenity {
    pub id: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let (created_at, updated_at) = timestamps();
        Amenity {
            id: new_id(),
            name: name.into(),
            created_at,
            updated_at,
        }
    }
}

// Identity is the id, never the field values
impl PartialEq for Amenity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Amenity {}

impl Hash for Amenity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Model for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Body of POST /amenities
#[derive(Debug, Deserialize)]
pub struct CreateAmenityRequest {
    pub name: Option<String>,
}

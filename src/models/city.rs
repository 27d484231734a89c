// src/models/city.rs
// DOCUMENTATION: City record and its request DTO
// PURPOSE: Cities belong to a State and hold Places

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{new_id, timestamps, EntityKind, Model};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct City {
    pub id: String,
    pub state_id: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let (created_at, updated_at) = timestamps();
        City {
            id: new_id(),
            state_id: state_id.into(),
            name: name.into(),
            created_at,
            updated_at,
        }
    }
}

impl Model for City {
    const KIND: EntityKind = EntityKind::City;
    const PROTECTED_FIELDS: &'static [&'static str] =
        &["id", "created_at", "updated_at", "state_id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Body of POST /states/{state_id}/cities
#[derive(Debug, Deserialize)]
pub struct CreateCityRequest {
    pub name: Option<String>,
}

// src/models/state.rs
// DOCUMENTATION: State record and its request DTO
// PURPOSE: Top of the State -> City -> Place hierarchy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{new_id, timestamps, EntityKind, Model};

/// Top of the location hierarchy; owns Cities through City.state_id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct State {
    pub id: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        let (created_at, updated_at) = timestamps();
        State {
            id: new_id(),
            name: name.into(),
            created_at,
            updated_at,
        }
    }
}

impl Model for State {
    const KIND: EntityKind = EntityKind::State;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Body of POST /states
#[derive(Debug, Deserialize)]
pub struct CreateStateRequest {
    pub name: Option<String>,
}

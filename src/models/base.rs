// src/models/base.rs
// DOCUMENTATION: What every persisted record has in common
// PURPOSE: Entity kinds and the Model trait the Entity Store is typed through

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Keys no client body may overwrite on any kind
pub const BASE_PROTECTED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// The record types held by the Entity Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Amenity,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::Review,
        EntityKind::State,
        EntityKind::User,
    ];

    /// Class name, used as the file store key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Amenity => "Amenity",
            EntityKind::City => "City",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
            EntityKind::State => "State",
            EntityKind::User => "User",
        }
    }

    /// Table name in PostgreSQL, also the key in /stats
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Amenity => "amenities",
            EntityKind::City => "cities",
            EntityKind::Place => "places",
            EntityKind::Review => "reviews",
            EntityKind::State => "states",
            EntityKind::User => "users",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type the Entity Store can persist
/// DOCUMENTATION: Records travel through the store as JSON documents;
/// this trait ties a Rust struct to its kind and its update rules
pub trait Model: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Keys ignored when a client body is merged onto the record
    const PROTECTED_FIELDS: &'static [&'static str] = BASE_PROTECTED_FIELDS;

    fn id(&self) -> &str;

    /// Refresh updated_at
    fn touch(&mut self);
}

/// Fresh record identifier
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Timestamp pair for a record created now
pub fn timestamps() -> (DateTime<Utc>, DateTime<Utc>) {
    let now = Utc::now();
    (now, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(EntityKind::Place.as_str(), "Place");
        assert_eq!(EntityKind::City.table(), "cities");
        assert_eq!(EntityKind::Amenity.to_string(), "Amenity");
    }

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, new_id());
    }
}

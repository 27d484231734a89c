// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Place record, its request DTOs and the search filter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use validator::Validate;

use super::base::{new_id, timestamps, EntityKind, Model};

/// A rentable place inside a City, owned by a User
/// DOCUMENTATION: Amenity links are held by the Entity Store, not by this
/// struct, so the same record shape serves both storage backends
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Owning city
    pub city_id: String,

    /// Owning user
    pub user_id: String,

    /// Place name - required field for all places
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Optional detailed description
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub number_rooms: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub number_bathrooms: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_guest: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub price_by_night: i32,

    /// Geographic coordinates
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let (created_at, updated_at) = timestamps();
        Place {
            id: new_id(),
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            created_at,
            updated_at,
        }
    }
}

// Places are deduplicated across overlapping search paths by id
impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Place {}

impl Hash for Place {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Model for Place {
    const KIND: EntityKind = EntityKind::Place;
    const PROTECTED_FIELDS: &'static [&'static str] =
        &["id", "created_at", "updated_at", "user_id", "city_id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Request DTO for creating a new place
/// DOCUMENTATION: Body of POST /cities/{city_id}/places
/// user_id and name are required but checked by the handler so the
/// error names the first missing field
#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: Option<i32>,
    #[serde(default)]
    pub number_bathrooms: Option<i32>,
    #[serde(default)]
    pub max_guest: Option<i32>,
    #[serde(default)]
    pub price_by_night: Option<i32>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Body of POST /places_search
/// DOCUMENTATION: Every list is optional; a missing or null list is empty
#[derive(Debug, Default, Deserialize)]
pub struct PlaceSearchRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub states: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Search criteria after request parsing
#[derive(Debug, Default, Clone)]
pub struct PlaceSearchFilter {
    pub states: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
}

impl From<PlaceSearchRequest> for PlaceSearchFilter {
    fn from(req: PlaceSearchRequest) -> Self {
        PlaceSearchFilter {
            states: req.states.into_iter().collect(),
            cities: req.cities.into_iter().collect(),
            amenities: req.amenities.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_place_identity_is_id() {
        let place = Place::new("c1", "u1", "Loft");
        let mut renamed = place.clone();
        renamed.name = "Renamed".to_string();

        let mut set = HashSet::new();
        set.insert(place.clone());
        set.insert(renamed);
        assert_eq!(set.len(), 1);

        set.insert(Place::new("c1", "u1", "Loft"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_search_request_null_lists_are_empty() {
        let req: PlaceSearchRequest =
            serde_json::from_str(r#"{"states": null, "cities": ["c1"], "amenities": null}"#)
                .unwrap();

        assert!(req.states.is_empty());
        assert_eq!(req.cities, vec!["c1".to_string()]);
        assert!(req.amenities.is_empty());
        assert!(serde_json::from_str::<PlaceSearchRequest>(r#"{"states": "s1"}"#).is_err());
    }

    #[test]
    fn test_search_request_defaults() {
        let req: PlaceSearchRequest = serde_json::from_str(r#"{"cities": ["c1", "c1"]}"#).unwrap();
        let filter = PlaceSearchFilter::from(req);

        assert!(filter.states.is_empty());
        assert_eq!(filter.cities.len(), 1);
        assert!(filter.amenities.is_empty());
    }

    #[test]
    fn test_place_validation() {
        let mut place = Place::new("c1", "u1", "Loft");
        assert!(place.validate().is_ok());

        place.max_guest = -1;
        assert!(place.validate().is_err());
    }
}

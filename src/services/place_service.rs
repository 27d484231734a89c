// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Place creation and the Place-Amenity link operations

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{Amenity, City, CreatePlaceRequest, Place, User};
use crate::services::EntityService;

pub struct PlaceService;

impl PlaceService {
    /// Places of a city
    pub async fn places_of_city(
        store: &dyn EntityStore,
        city_id: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        let city = store.fetch_required::<City>(city_id).await?;
        store.related::<Place>("city_id", &city.id).await
    }

    /// Create a new place in a city
    /// DOCUMENTATION: Checks run in order: city exists, user_id present,
    /// user exists, name present
    pub async fn create_place(
        store: &dyn EntityStore,
        city_id: &str,
        req: CreatePlaceRequest,
    ) -> Result<Place, PlacesError> {
        let city = store.fetch_required::<City>(city_id).await?;

        let user_id = req.user_id.ok_or(PlacesError::MissingField("user_id"))?;
        let user = store.fetch_required::<User>(&user_id).await?;
        let name = req.name.ok_or(PlacesError::MissingField("name"))?;

        let mut place = Place::new(city.id, user.id, name);
        place.description = req.description;
        place.number_rooms = req.number_rooms.unwrap_or_default();
        place.number_bathrooms = req.number_bathrooms.unwrap_or_default();
        place.max_guest = req.max_guest.unwrap_or_default();
        place.price_by_night = req.price_by_night.unwrap_or_default();
        place.latitude = req.latitude;
        place.longitude = req.longitude;

        EntityService::create(store, place).await
    }

    /// Amenities currently linked to a place
    pub async fn amenities(
        store: &dyn EntityStore,
        place_id: &str,
    ) -> Result<Vec<Amenity>, PlacesError> {
        let place = store.fetch_required::<Place>(place_id).await?;
        store.place_amenities(&place.id).await
    }

    /// Link an amenity to a place
    /// DOCUMENTATION: Idempotent; the flag is true only when a new link was
    /// created, an existing link is left untouched
    pub async fn link_amenity(
        store: &dyn EntityStore,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(Amenity, bool), PlacesError> {
        let place = store.fetch_required::<Place>(place_id).await?;
        let amenity = store.fetch_required::<Amenity>(amenity_id).await?;

        let created = store.link_amenity(&place.id, &amenity.id).await?;
        if created {
            log::info!("Linked amenity {} to place {}", amenity.id, place.id);
        } else {
            log::debug!("Amenity {} already linked to place {}", amenity.id, place.id);
        }

        Ok((amenity, created))
    }

    /// Unlink an amenity from a place
    /// DOCUMENTATION: NotFound when the amenity is not linked
    pub async fn unlink_amenity(
        store: &dyn EntityStore,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(), PlacesError> {
        let place = store.fetch_required::<Place>(place_id).await?;
        let amenity = store.fetch_required::<Amenity>(amenity_id).await?;

        if !store.unlink_amenity(&place.id, &amenity.id).await? {
            log::warn!("Amenity {} is not linked to place {}", amenity.id, place.id);
            return Err(PlacesError::NotFound(format!(
                "Amenity {} on Place {}",
                amenity.id, place.id
            )));
        }

        log::info!("Unlinked amenity {} from place {}", amenity.id, place.id);
        Ok(())
    }
}

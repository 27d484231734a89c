// src/services/city_service.rs
// DOCUMENTATION: City operations scoped to a state
// PURPOSE: Listing and creation checks for cities of a state

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{City, CreateCityRequest, State};
use crate::services::EntityService;

pub struct CityService;

impl CityService {
    pub async fn cities_of_state(
        store: &dyn EntityStore,
        state_id: &str,
    ) -> Result<Vec<City>, PlacesError> {
        let state = store.fetch_required::<State>(state_id).await?;
        store.related::<City>("state_id", &state.id).await
    }

    pub async fn create_city(
        store: &dyn EntityStore,
        state_id: &str,
        req: CreateCityRequest,
    ) -> Result<City, PlacesError> {
        let state = store.fetch_required::<State>(state_id).await?;
        let name = req.name.ok_or(PlacesError::MissingField("name"))?;

        EntityService::create(store, City::new(state.id, name)).await
    }
}

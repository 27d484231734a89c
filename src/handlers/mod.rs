// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and mount them under /api/v1

pub mod amenities;
pub mod cities;
pub mod health;
pub mod place_amenities;
pub mod places;
pub mod reviews;
pub mod states;
pub mod users;

pub use amenities::config as amenities_config;
pub use cities::config as cities_config;
pub use health::config as health_config;
pub use place_amenities::config as place_amenities_config;
pub use places::config as places_config;
pub use reviews::config as reviews_config;
pub use states::config as states_config;
pub use users::config as users_config;

use crate::db::EntityStore;
use crate::errors::PlacesError;
use actix_web::web;
use std::sync::Arc;

/// JSON extractor settings shared by every route
/// DOCUMENTATION: Any body that cannot be read as the expected JSON shape
/// (wrong content type, malformed, wrong field types) answers "Not a JSON"
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::debug!("Rejected body for {}: {}", req.path(), err);
        PlacesError::NotAJson.into()
    })
}

/// Store handle, JSON settings and every route of the API
pub fn api(store: Arc<dyn EntityStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::<dyn EntityStore>::from(store))
            .app_data(json_config())
            .service(
                web::scope("/api/v1")
                    .configure(health_config)
                    .configure(states_config)
                    .configure(cities_config)
                    .configure(amenities_config)
                    .configure(users_config)
                    .configure(places_config)
                    .configure(place_amenities_config)
                    .configure(reviews_config),
            );
    }
}

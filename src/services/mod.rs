// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod city_service;
pub mod entity_service;
pub mod password;
pub mod place_service;
pub mod review_service;
pub mod search_service;
pub mod user_service;

pub use city_service::*;
pub use entity_service::*;
pub use password::*;
pub use place_service::*;
pub use review_service::*;
pub use search_service::*;
pub use user_service::*;

// src/services/entity_service.rs
// DOCUMENTATION: Generic CRUD over any Model
// PURPOSE: Shared get/list/create/update/delete rules for every resource

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::Model;
use serde_json::{Map, Value};
use validator::Validate;

/// Run field validation, turning failures into a 400
pub fn validate<M: Validate>(model: &M) -> Result<(), PlacesError> {
    model
        .validate()
        .map_err(|e| PlacesError::ValidationError(e.to_string()))
}

pub struct EntityService;

impl EntityService {
    pub async fn list<M: Model>(store: &dyn EntityStore) -> Result<Vec<M>, PlacesError> {
        store.fetch_all::<M>().await
    }

    pub async fn get<M: Model>(store: &dyn EntityStore, id: &str) -> Result<M, PlacesError> {
        store.fetch_required::<M>(id).await
    }

    /// Validate and persist a freshly built record
    pub async fn create<M: Model>(store: &dyn EntityStore, model: M) -> Result<M, PlacesError> {
        validate(&model)?;
        store.persist(&model).await?;
        log::info!("Created {} {}", M::KIND, model.id());
        Ok(model)
    }

    /// Merge a client body onto the stored record and persist it
    /// DOCUMENTATION: Keys in M::PROTECTED_FIELDS are ignored
    pub async fn update<M: Model>(
        store: &dyn EntityStore,
        id: &str,
        body: Map<String, Value>,
    ) -> Result<M, PlacesError> {
        let current = store.fetch_required::<M>(id).await?;
        let updated = Self::merge(&current, body)?;
        Self::save_updated(store, updated).await
    }

    /// Touch, validate and persist an already merged record
    pub async fn save_updated<M: Model>(
        store: &dyn EntityStore,
        mut model: M,
    ) -> Result<M, PlacesError> {
        model.touch();
        validate(&model)?;
        store.persist(&model).await?;
        log::info!("Updated {} {}", M::KIND, model.id());
        Ok(model)
    }

    /// Delete a record and everything it owns
    /// DOCUMENTATION: Deleting a User removes its Places and Reviews,
    /// deleting a Place removes its Reviews
    pub async fn delete<M: Model>(store: &dyn EntityStore, id: &str) -> Result<(), PlacesError> {
        if store.fetch::<M>(id).await?.is_none() {
            log::warn!("{} not found: {}", M::KIND, id);
            return Err(PlacesError::not_found(M::KIND, id));
        }

        store.remove_dependents(M::KIND, id).await?;
        if !store.remove::<M>(id).await? {
            log::warn!("{} vanished during delete: {}", M::KIND, id);
            return Err(PlacesError::not_found(M::KIND, id));
        }

        log::info!("Deleted {} {}", M::KIND, id);
        Ok(())
    }

    /// Apply the non-protected keys of `body` to a copy of `current`
    /// DOCUMENTATION: Keys the model does not know are dropped; values of the
    /// wrong type are a 400
    pub fn merge<M: Model>(current: &M, body: Map<String, Value>) -> Result<M, PlacesError> {
        let mut record = serde_json::to_value(current)
            .map_err(|e| PlacesError::StorageError(format!("Cannot serialize {}: {}", M::KIND, e)))?;

        if let Some(fields) = record.as_object_mut() {
            for (key, value) in body {
                if M::PROTECTED_FIELDS.contains(&key.as_str()) {
                    log::debug!("Ignoring protected field {} on {}", key, M::KIND);
                    continue;
                }
                fields.insert(key, value);
            }
        }

        serde_json::from_value(record).map_err(|e| PlacesError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use crate::models::{City, Place, Review, State, User};
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::assert_err;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_ignores_protected_fields() {
        let place = Place::new("c1", "u1", "Loft");
        let merged = EntityService::merge(
            &place,
            body(json!({
                "id": "hijack",
                "user_id": "u2",
                "city_id": "c2",
                "created_at": "2001-01-01T00:00:00Z",
                "name": "Penthouse",
                "max_guest": 4,
                "unknown": true
            })),
        )
        .unwrap();

        assert_eq!(merged.id, place.id);
        assert_eq!(merged.user_id, "u1");
        assert_eq!(merged.city_id, "c1");
        assert_eq!(merged.created_at, place.created_at);
        assert_eq!(merged.name, "Penthouse");
        assert_eq!(merged.max_guest, 4);
    }

    #[test]
    fn test_merge_rejects_wrong_types() {
        let city = City::new("s1", "Oakland");
        let result = EntityService::merge(&city, body(json!({ "name": 42 })));
        assert!(matches!(result, Err(PlacesError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let state = EntityService::create(store.as_ref(), State::new("Nevda"))
            .await
            .unwrap();

        let updated: State =
            EntityService::update(store.as_ref(), &state.id, body(json!({ "name": "Nevada" })))
                .await
                .unwrap();
        assert_eq!(updated.name, "Nevada");
        assert!(updated.updated_at >= state.updated_at);

        EntityService::delete::<State>(store.as_ref(), &state.id).await.unwrap();
        assert_err!(EntityService::get::<State>(store.as_ref(), &state.id).await);
        assert_err!(EntityService::delete::<State>(store.as_ref(), &state.id).await);
    }

    #[tokio::test]
    async fn test_delete_user_removes_owned_records() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let owner = User::new("owner@example.com", "hash");
        let guest = User::new("guest@example.com", "hash");
        let loft = Place::new("c1", &owner.id, "Loft");
        let cabin = Place::new("c1", &guest.id, "Cabin");
        let on_loft = Review::new(&loft.id, &guest.id, "Nice loft");
        let on_cabin = Review::new(&cabin.id, &owner.id, "Cozy");
        let kept = Review::new(&cabin.id, &guest.id, "My own cabin");

        store.persist(&owner).await.unwrap();
        store.persist(&guest).await.unwrap();
        store.persist(&loft).await.unwrap();
        store.persist(&cabin).await.unwrap();
        for review in [&on_loft, &on_cabin, &kept] {
            store.persist(review).await.unwrap();
        }

        EntityService::delete::<User>(store.as_ref(), &owner.id).await.unwrap();

        assert!(store.related::<Place>("user_id", &owner.id).await.unwrap().is_empty());
        assert!(store.related::<Review>("user_id", &owner.id).await.unwrap().is_empty());
        assert!(store.fetch::<Review>(&on_loft.id).await.unwrap().is_none());

        let places = store.fetch_all::<Place>().await.unwrap();
        assert_eq!(places, vec![cabin.clone()]);
        let reviews = store.fetch_all::<Review>().await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, kept.id);
        assert!(store.fetch::<User>(&guest.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_place_removes_its_reviews() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let loft = Place::new("c1", "u1", "Loft");
        let cabin = Place::new("c1", "u1", "Cabin");
        let review = Review::new(&loft.id, "u2", "Nice");
        let other = Review::new(&cabin.id, "u2", "Fine");
        store.persist(&loft).await.unwrap();
        store.persist(&cabin).await.unwrap();
        store.persist(&review).await.unwrap();
        store.persist(&other).await.unwrap();

        EntityService::delete::<Place>(store.as_ref(), &loft.id).await.unwrap();

        assert!(store.fetch::<Review>(&review.id).await.unwrap().is_none());
        assert!(store.fetch::<Review>(&other.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_validates() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let result = EntityService::create(store.as_ref(), State::new("")).await;

        assert!(matches!(result, Err(PlacesError::ValidationError(_))));
        assert!(EntityService::list::<State>(store.as_ref()).await.unwrap().is_empty());
    }
}

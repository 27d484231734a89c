// src/db/mod.rs
// DOCUMENTATION: Entity Store abstraction and its two backends
// PURPOSE: The only door business logic has to persisted state

pub mod file_store;
pub mod pg_store;

pub use file_store::FileStore;
pub use pg_store::PgStore;

use crate::errors::PlacesError;
use crate::models::{Amenity, EntityKind, Model, Place, Review};
use async_trait::async_trait;
use serde_json::Value;

/// Persistence interface over typed records
/// DOCUMENTATION: Records cross this boundary as JSON documents so the
/// trait stays object safe; the typed helpers on `dyn EntityStore` below
/// convert to and from model structs. Listing methods return records
/// ordered by id.
///
/// The Place-Amenity relationship is part of the trait because the two
/// backends keep it differently: FileStore as an id list on the Place
/// record, PgStore as rows of a join table.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Short backend name for logs and /status
    fn backend(&self) -> &'static str;

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, PlacesError>;

    async fn all(&self, kind: EntityKind) -> Result<Vec<Value>, PlacesError>;

    /// Insert or replace the record stored under `id`
    async fn save(&self, kind: EntityKind, id: &str, record: Value) -> Result<(), PlacesError>;

    /// Returns false when nothing was stored under `id`
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<bool, PlacesError>;

    async fn count(&self, kind: EntityKind) -> Result<usize, PlacesError> {
        Ok(self.all(kind).await?.len())
    }

    /// Records of `kind` whose `foreign_key` field equals `parent_id`
    async fn children(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        parent_id: &str,
    ) -> Result<Vec<Value>, PlacesError> {
        let records = self.all(kind).await?;
        Ok(records
            .into_iter()
            .filter(|record| record.get(foreign_key).and_then(Value::as_str) == Some(parent_id))
            .collect())
    }

    /// Ids of the amenities currently linked to a place, as persisted
    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, PlacesError>;

    /// Returns true when a new link was created, false when it already existed
    async fn link_amenity(&self, place_id: &str, amenity_id: &str) -> Result<bool, PlacesError>;

    /// Returns false when the amenity was not linked
    async fn unlink_amenity(&self, place_id: &str, amenity_id: &str)
        -> Result<bool, PlacesError>;
}

fn decode<M: Model>(record: Value) -> Result<M, PlacesError> {
    serde_json::from_value(record).map_err(|e| {
        log::error!("Corrupt {} record: {}", M::KIND, e);
        PlacesError::StorageError(format!("Corrupt {} record: {}", M::KIND, e))
    })
}

fn encode<M: Model>(model: &M) -> Result<Value, PlacesError> {
    serde_json::to_value(model).map_err(|e| {
        PlacesError::StorageError(format!("Cannot serialize {}: {}", M::KIND, e))
    })
}

/// Typed access
/// DOCUMENTATION: Relationship accessors (a State's cities, a City's
/// places, a Place's amenities) live here so both backends answer them
/// through the same calls
impl<'a> dyn EntityStore + 'a {
    pub async fn fetch<M: Model>(&self, id: &str) -> Result<Option<M>, PlacesError> {
        match self.get(M::KIND, id).await? {
            Some(record) => Ok(Some(decode(record)?)),
            None => Ok(None),
        }
    }

    /// Like fetch, but a missing record is a NotFound error
    pub async fn fetch_required<M: Model>(&self, id: &str) -> Result<M, PlacesError> {
        self.fetch(id).await?.ok_or_else(|| {
            log::warn!("{} not found: {}", M::KIND, id);
            PlacesError::not_found(M::KIND, id)
        })
    }

    pub async fn fetch_all<M: Model>(&self) -> Result<Vec<M>, PlacesError> {
        self.all(M::KIND).await?.into_iter().map(decode).collect()
    }

    pub async fn persist<M: Model>(&self, model: &M) -> Result<(), PlacesError> {
        self.save(M::KIND, model.id(), encode(model)?).await
    }

    pub async fn remove<M: Model>(&self, id: &str) -> Result<bool, PlacesError> {
        self.delete(M::KIND, id).await
    }

    pub async fn related<M: Model>(
        &self,
        foreign_key: &str,
        parent_id: &str,
    ) -> Result<Vec<M>, PlacesError> {
        self.children(M::KIND, foreign_key, parent_id)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Delete the records owned by a record about to be deleted
    /// DOCUMENTATION: A User takes its Places (with their Reviews) and the
    /// Reviews it wrote; a Place takes its Reviews. Other kinds own nothing.
    /// The owner itself is left for the caller to remove.
    pub async fn remove_dependents(&self, kind: EntityKind, id: &str) -> Result<(), PlacesError> {
        match kind {
            EntityKind::User => {
                for place in self.related::<Place>("user_id", id).await? {
                    self.remove_reviews_of_place(&place.id).await?;
                    self.remove::<Place>(&place.id).await?;
                    log::info!("Deleted Place {} with its owner {}", place.id, id);
                }
                for review in self.related::<Review>("user_id", id).await? {
                    self.remove::<Review>(&review.id).await?;
                    log::info!("Deleted Review {} with its author {}", review.id, id);
                }
            }
            EntityKind::Place => self.remove_reviews_of_place(id).await?,
            _ => {}
        }
        Ok(())
    }

    async fn remove_reviews_of_place(&self, place_id: &str) -> Result<(), PlacesError> {
        for review in self.related::<Review>("place_id", place_id).await? {
            self.remove::<Review>(&review.id).await?;
            log::info!("Deleted Review {} with its place {}", review.id, place_id);
        }
        Ok(())
    }

    /// Amenities linked to a place, re-read from the store on every call
    /// DOCUMENTATION: Links pointing at amenities that no longer exist are
    /// skipped
    pub async fn place_amenities(&self, place_id: &str) -> Result<Vec<Amenity>, PlacesError> {
        let mut amenities = Vec::new();
        for amenity_id in self.amenity_ids(place_id).await? {
            match self.fetch::<Amenity>(&amenity_id).await? {
                Some(amenity) => amenities.push(amenity),
                None => log::debug!(
                    "Place {} links missing amenity {}, skipping",
                    place_id,
                    amenity_id
                ),
            }
        }
        Ok(amenities)
    }
}

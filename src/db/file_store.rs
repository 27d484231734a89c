// src/db/file_store.rs
// DOCUMENTATION: File-backed Entity Store
// PURPOSE: Keep every record in memory and mirror it to a JSON file

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::EntityKind;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Field on a stored Place record holding its linked amenity ids
const AMENITY_IDS: &str = "amenity_ids";

/// Entity Store over a `<Kind>.<id>` keyed map
/// DOCUMENTATION: The file, when configured, is rewritten after every
/// mutation while the write lock is held, so it always matches memory.
/// Place-Amenity links are stored as an `amenity_ids` list on the Place
/// record and survive saves of the Place that do not mention them.
pub struct FileStore {
    path: Option<PathBuf>,
    objects: RwLock<BTreeMap<String, Value>>,
}

fn object_key(kind: EntityKind, id: &str) -> String {
    format!("{}.{}", kind.as_str(), id)
}

fn kind_prefix(kind: EntityKind) -> String {
    format!("{}.", kind.as_str())
}

impl FileStore {
    /// Store that never touches the disk
    pub fn in_memory() -> Self {
        FileStore {
            path: None,
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Open a store backed by `path`, loading it when the file exists
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PlacesError> {
        let path = path.as_ref().to_path_buf();

        let objects = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice::<BTreeMap<String, Value>>(&bytes).map_err(|e| {
                log::error!("Cannot parse {}: {}", path.display(), e);
                PlacesError::StorageError(format!("Cannot parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} does not exist yet, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                log::error!("Cannot read {}: {}", path.display(), e);
                return Err(PlacesError::StorageError(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        log::info!("Loaded {} records from {}", objects.len(), path.display());

        Ok(FileStore {
            path: Some(path),
            objects: RwLock::new(objects),
        })
    }

    /// Write the whole map to disk via a temp file and rename
    async fn flush(&self, objects: &BTreeMap<String, Value>) -> Result<(), PlacesError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec(objects)
            .map_err(|e| PlacesError::StorageError(format!("Cannot serialize store: {}", e)))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            log::error!("Cannot write {}: {}", tmp.display(), e);
            PlacesError::StorageError(format!("Cannot write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            log::error!("Cannot replace {}: {}", path.display(), e);
            PlacesError::StorageError(format!("Cannot replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Flush after a change to `key`, putting `previous` back when the
    /// write fails so memory never holds what the file does not
    async fn commit(
        &self,
        objects: &mut BTreeMap<String, Value>,
        key: &str,
        previous: Option<Value>,
    ) -> Result<(), PlacesError> {
        if let Err(e) = self.flush(objects).await {
            match previous {
                Some(record) => objects.insert(key.to_string(), record),
                None => objects.remove(key),
            };
            log::warn!("Rolled back {} after failed write", key);
            return Err(e);
        }
        Ok(())
    }
}

fn amenity_ids_of(record: &Value) -> Vec<String> {
    record
        .get(AMENITY_IDS)
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn amenity_ids_mut<'r>(
    record: &'r mut Value,
    place_id: &str,
) -> Result<&'r mut Vec<Value>, PlacesError> {
    let fields: &mut Map<String, Value> = record.as_object_mut().ok_or_else(|| {
        PlacesError::StorageError(format!("Place record {} is not an object", place_id))
    })?;

    if !matches!(fields.get(AMENITY_IDS), Some(Value::Array(_))) {
        fields.insert(AMENITY_IDS.to_string(), Value::Array(Vec::new()));
    }

    match fields.get_mut(AMENITY_IDS) {
        Some(Value::Array(ids)) => Ok(ids),
        _ => Err(PlacesError::StorageError(format!(
            "Place record {} has no amenity list",
            place_id
        ))),
    }
}

#[async_trait]
impl EntityStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.get(&object_key(kind, id)).cloned())
    }

    async fn all(&self, kind: EntityKind) -> Result<Vec<Value>, PlacesError> {
        let prefix = kind_prefix(kind);
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn save(&self, kind: EntityKind, id: &str, mut record: Value) -> Result<(), PlacesError> {
        let key = object_key(kind, id);
        let mut objects = self.objects.write().await;

        if kind == EntityKind::Place {
            if let (Some(existing), Some(fields)) = (objects.get(&key), record.as_object_mut()) {
                if !fields.contains_key(AMENITY_IDS) {
                    if let Some(ids) = existing.get(AMENITY_IDS) {
                        fields.insert(AMENITY_IDS.to_string(), ids.clone());
                    }
                }
            }
        }

        let previous = objects.insert(key.clone(), record);
        self.commit(&mut objects, &key, previous).await?;
        log::debug!("Saved {}.{}", kind, id);
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<bool, PlacesError> {
        let key = object_key(kind, id);
        let mut objects = self.objects.write().await;
        let Some(previous) = objects.remove(&key) else {
            return Ok(false);
        };

        self.commit(&mut objects, &key, Some(previous)).await?;
        log::debug!("Deleted {}.{}", kind, id);
        Ok(true)
    }

    async fn count(&self, kind: EntityKind) -> Result<usize, PlacesError> {
        let prefix = kind_prefix(kind);
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .count())
    }

    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects
            .get(&object_key(EntityKind::Place, place_id))
            .map(amenity_ids_of)
            .unwrap_or_default())
    }

    async fn link_amenity(&self, place_id: &str, amenity_id: &str) -> Result<bool, PlacesError> {
        let key = object_key(EntityKind::Place, place_id);
        let mut objects = self.objects.write().await;
        let record = objects
            .get_mut(&key)
            .ok_or_else(|| PlacesError::not_found(EntityKind::Place, place_id))?;
        let previous = record.clone();

        let ids = amenity_ids_mut(record, place_id)?;
        if ids.iter().any(|id| id.as_str() == Some(amenity_id)) {
            return Ok(false);
        }
        ids.push(Value::String(amenity_id.to_string()));

        self.commit(&mut objects, &key, Some(previous)).await?;
        Ok(true)
    }

    async fn unlink_amenity(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<bool, PlacesError> {
        let key = object_key(EntityKind::Place, place_id);
        let mut objects = self.objects.write().await;
        let record = match objects.get_mut(&key) {
            Some(record) => record,
            None => return Ok(false),
        };
        let previous = record.clone();

        let ids = amenity_ids_mut(record, place_id)?;
        let before = ids.len();
        ids.retain(|id| id.as_str() != Some(amenity_id));
        if ids.len() == before {
            return Ok(false);
        }

        self.commit(&mut objects, &key, Some(previous)).await?;
        Ok(true)
    }
}

// src/db/pg_store.rs
// DOCUMENTATION: PostgreSQL-backed Entity Store
// PURPOSE: One JSONB document table per kind plus the place_amenity join table

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::EntityKind;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

/// Entity Store over a PostgreSQL pool
/// DOCUMENTATION: Table names come from EntityKind::table(), never from
/// client input, so formatting them into SQL is safe
pub struct PgStore {
    pool: PgPool,
}

fn db_error(context: &str, e: sqlx::Error) -> PlacesError {
    log::error!("{}: {}", context, e);
    PlacesError::DatabaseError(format!("{}: {}", context, e))
}

impl PgStore {
    /// Wrap a pool, creating the tables when they are missing
    pub async fn new(pool: PgPool) -> Result<Self, PlacesError> {
        let store = PgStore { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), PlacesError> {
        for kind in EntityKind::ALL {
            let sql = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id TEXT PRIMARY KEY,
                    data JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                kind.table()
            );
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error(&format!("Create table {}", kind.table()), e))?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS place_amenity (
                place_id TEXT NOT NULL REFERENCES places(id) ON DELETE CASCADE,
                amenity_id TEXT NOT NULL REFERENCES amenities(id) ON DELETE CASCADE,
                PRIMARY KEY (place_id, amenity_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Create table place_amenity", e))?;

        log::info!("Database schema ready");
        Ok(())
    }
}

#[async_trait]
impl EntityStore for PgStore {
    fn backend(&self) -> &'static str {
        "db"
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, PlacesError> {
        let sql = format!("SELECT data FROM {} WHERE id = $1", kind.table());
        let row: Option<(Value,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Fetch {}.{}", kind, id), e))?;

        Ok(row.map(|(data,)| data))
    }

    async fn all(&self, kind: EntityKind) -> Result<Vec<Value>, PlacesError> {
        let sql = format!("SELECT data FROM {} ORDER BY id", kind.table());
        let rows: Vec<(Value,)> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(&format!("List {}", kind), e))?;

        Ok(rows.into_iter().map(|(data,)| data).collect())
    }

    async fn save(&self, kind: EntityKind, id: &str, record: Value) -> Result<(), PlacesError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, data, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE
            SET data = EXCLUDED.data,
                updated_at = NOW()
            "#,
            kind.table()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&record)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Save {}.{}", kind, id), e))?;

        log::debug!("Saved {}.{}", kind, id);
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<bool, PlacesError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let rows = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Delete {}.{}", kind, id), e))?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn count(&self, kind: EntityKind) -> Result<usize, PlacesError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: (i64,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Count {}", kind), e))?;

        Ok(count.0.max(0) as usize)
    }

    async fn children(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        parent_id: &str,
    ) -> Result<Vec<Value>, PlacesError> {
        let sql = format!(
            "SELECT data FROM {} WHERE data ->> $1 = $2 ORDER BY id",
            kind.table()
        );
        let rows: Vec<(Value,)> = sqlx::query_as(&sql)
            .bind(foreign_key)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(&format!("List {} by {}", kind, foreign_key), e))?;

        Ok(rows.into_iter().map(|(data,)| data).collect())
    }

    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT amenity_id FROM place_amenity WHERE place_id = $1 ORDER BY amenity_id",
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Fetch amenities of place {}", place_id), e))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn link_amenity(&self, place_id: &str, amenity_id: &str) -> Result<bool, PlacesError> {
        let rows = sqlx::query(
            r#"
            INSERT INTO place_amenity (place_id, amenity_id)
            VALUES ($1, $2)
            ON CONFLICT (place_id, amenity_id) DO NOTHING
            "#,
        )
        .bind(place_id)
        .bind(amenity_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Link amenity {} to {}", amenity_id, place_id), e))?
        .rows_affected();

        Ok(rows == 1)
    }

    async fn unlink_amenity(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<bool, PlacesError> {
        let rows = sqlx::query("DELETE FROM place_amenity WHERE place_id = $1 AND amenity_id = $2")
            .bind(place_id)
            .bind(amenity_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                db_error(&format!("Unlink amenity {} from {}", amenity_id, place_id), e)
            })?
            .rows_affected();

        Ok(rows > 0)
    }
}

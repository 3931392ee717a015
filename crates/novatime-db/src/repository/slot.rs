//! # Slot Repository
//!
//! Key/value storage for values that must survive a restart.
//!
//! A slot holds one text value under a string key. The storefront keeps
//! exactly one today: the logged-in user under `novatime_user`, stored as
//! a JSON document.
//!
//! ```text
//! set("novatime_user", json)     INSERT ... ON CONFLICT(key) DO UPDATE
//! get("novatime_user")           SELECT value        → Option<String>
//! remove("novatime_user")        DELETE              → existed?
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for the `slots` table.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    /// Creates a new SlotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SlotRepository { pool }
    }

    /// Reads the raw value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing slot");

        sqlx::query(
            r#"
            INSERT INTO slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes the slot. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        debug!(key = %key, "Removing slot");

        let result = sqlx::query("DELETE FROM slots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks if a slot is present.
    pub async fn exists(&self, key: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slots WHERE key = ?1")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Reads and decodes a JSON slot.
    ///
    /// ## Errors
    /// [`DbError::InvalidSlotValue`] when the stored text is not a valid
    /// `T`. The slot is left untouched; callers decide whether to clear it.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DbError::invalid_slot(key, e)),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON and stores it.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::invalid_slot(key, e))?;
        self.set(key, &raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

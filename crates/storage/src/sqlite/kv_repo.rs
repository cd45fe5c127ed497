use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use quiz_core::model::{APPEARANCE_KEY, Appearance, SNAPSHOT_KEY, SessionSnapshot};

use super::SqliteRepository;
use crate::repository::{
    PreferenceRepository, SnapshotRepository, StorageError, decode_appearance, decode_snapshot,
    encode_snapshot,
};

impl SqliteRepository {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|err| StorageError::Serialization(err.to_string()))
        })
        .transpose()
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for SqliteRepository {
    async fn save_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let encoded = encode_snapshot(snapshot)?;
        self.put_value(SNAPSHOT_KEY, &encoded).await
    }

    async fn load_snapshot(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        self.get_value(SNAPSHOT_KEY)
            .await?
            .as_deref()
            .map(decode_snapshot)
            .transpose()
    }
}

#[async_trait]
impl PreferenceRepository for SqliteRepository {
    async fn get_appearance(&self) -> Result<Option<Appearance>, StorageError> {
        self.get_value(APPEARANCE_KEY)
            .await?
            .as_deref()
            .map(decode_appearance)
            .transpose()
    }

    async fn save_appearance(&self, appearance: Appearance) -> Result<(), StorageError> {
        self.put_value(APPEARANCE_KEY, appearance.as_str()).await
    }
}

use async_trait::async_trait;
use quiz_core::model::{APPEARANCE_KEY, Appearance, SNAPSHOT_KEY, SessionSnapshot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Write side of the progress snapshot.
///
/// `load_snapshot` exists for diagnostics and tests; sessions never restore from it.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Overwrite the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be serialized or stored.
    async fn save_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the stored value cannot be read or decoded.
    async fn load_snapshot(&self) -> Result<Option<SessionSnapshot>, StorageError>;
}

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the stored value cannot be read or is not a
    /// known appearance.
    async fn get_appearance(&self) -> Result<Option<Appearance>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save_appearance(&self, appearance: Appearance) -> Result<(), StorageError>;
}

pub(crate) fn encode_snapshot(snapshot: &SessionSnapshot) -> Result<String, StorageError> {
    serde_json::to_string(snapshot).map_err(|err| StorageError::Serialization(err.to_string()))
}

pub(crate) fn decode_snapshot(raw: &str) -> Result<SessionSnapshot, StorageError> {
    serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
}

pub(crate) fn decode_appearance(raw: &str) -> Result<Appearance, StorageError> {
    raw.parse::<Appearance>()
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Key-value map behind a mutex, for tests and runs without a database.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for a key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn save_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        self.put(SNAPSHOT_KEY, encode_snapshot(snapshot)?)
    }

    async fn load_snapshot(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        self.raw(SNAPSHOT_KEY)?
            .as_deref()
            .map(decode_snapshot)
            .transpose()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_appearance(&self) -> Result<Option<Appearance>, StorageError> {
        self.raw(APPEARANCE_KEY)?
            .as_deref()
            .map(decode_appearance)
            .transpose()
    }

    async fn save_appearance(&self, appearance: Appearance) -> Result<(), StorageError> {
        self.put(APPEARANCE_KEY, appearance.as_str().to_string())
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub snapshots: Arc<dyn SnapshotRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let snapshots: Arc<dyn SnapshotRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(repo);
        Self {
            snapshots,
            preferences,
        }
    }
}

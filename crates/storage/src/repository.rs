use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("invalid preference key: {0:?}")]
    InvalidKey(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A stored preference value with its last write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Key-value store for small user preferences (the page only keeps `theme`).
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetch a preference by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures. A missing key is `Ok(None)`.
    async fn get_preference(&self, key: &str) -> Result<Option<PreferenceRecord>, StorageError>;

    /// Insert or overwrite a preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for a blank key, or other storage errors.
    async fn set_preference(
        &self,
        key: &str,
        value: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Remove a preference. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn clear_preference(&self, key: &str) -> Result<(), StorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<&str, StorageError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(trimmed)
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    preferences: Arc<Mutex<HashMap<String, PreferenceRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preference(&self, key: &str) -> Result<Option<PreferenceRecord>, StorageError> {
        let key = validate_key(key)?;
        let guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_preference(
        &self,
        key: &str,
        value: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let key = validate_key(key)?;
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            key.to_owned(),
            PreferenceRecord {
                key: key.to_owned(),
                value: value.to_owned(),
                updated_at,
            },
        );
        Ok(())
    }

    async fn clear_preference(&self, key: &str) -> Result<(), StorageError> {
        let key = validate_key(key)?;
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(InMemoryRepository::new());
        Self { preferences }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn missing_preference_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_preference("theme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let repo = InMemoryRepository::new();
        repo.set_preference("theme", "dark", fixed_now())
            .await
            .unwrap();
        let later = fixed_now() + Duration::minutes(5);
        repo.set_preference("theme", "light", later).await.unwrap();

        let record = repo.get_preference("theme").await.unwrap().unwrap();
        assert_eq!(record.value, "light");
        assert_eq!(record.updated_at, later);
    }

    #[tokio::test]
    async fn clear_removes_value_and_tolerates_missing() {
        let repo = InMemoryRepository::new();
        repo.set_preference("theme", "dark", fixed_now())
            .await
            .unwrap();
        repo.clear_preference("theme").await.unwrap();
        repo.clear_preference("theme").await.unwrap();
        assert!(repo.get_preference("theme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_key_is_rejected() {
        let repo = InMemoryRepository::new();
        let err = repo.set_preference("  ", "dark", fixed_now()).await;
        assert!(matches!(err, Err(StorageError::InvalidKey(_))));
    }
}

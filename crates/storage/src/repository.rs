use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
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

/// The three durable keys the app keeps between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The logged-in user, absent when logged out.
    CurrentUser,
    /// Every recorded quiz result, newest first.
    ResultLog,
    /// Prompt and sampling overrides.
    GenerationSettings,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [
        StoreKey::CurrentUser,
        StoreKey::ResultLog,
        StoreKey::GenerationSettings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StoreKey::CurrentUser => "currentUser",
            StoreKey::ResultLog => "resultLog",
            StoreKey::GenerationSettings => "generationSettings",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string values addressed by `StoreKey`.
///
/// Values are opaque to the store; callers encode them (see `crate::json`).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn put(&self, key: StoreKey, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: StoreKey) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<StoreKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemoryRepository {
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn put(&self, key: StoreKey, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: StoreKey) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

/// Wraps the session store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let session: Arc<dyn SessionStore> = Arc::new(InMemoryRepository::new());
        Self { session }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_use_stable_names() {
        let names: Vec<_> = StoreKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["currentUser", "resultLog", "generationSettings"]);
    }

    #[tokio::test]
    async fn put_get_remove_round_trip() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get(StoreKey::CurrentUser).await.unwrap(), None);

        repo.put(StoreKey::CurrentUser, "{\"name\":\"a\"}").await.unwrap();
        repo.put(StoreKey::CurrentUser, "{\"name\":\"b\"}").await.unwrap();
        assert_eq!(
            repo.get(StoreKey::CurrentUser).await.unwrap().as_deref(),
            Some("{\"name\":\"b\"}")
        );

        repo.remove(StoreKey::CurrentUser).await.unwrap();
        repo.remove(StoreKey::CurrentUser).await.unwrap();
        assert_eq!(repo.get(StoreKey::CurrentUser).await.unwrap(), None);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let storage = Storage::in_memory();
        storage.session.put(StoreKey::ResultLog, "[]").await.unwrap();
        assert_eq!(storage.session.get(StoreKey::GenerationSettings).await.unwrap(), None);
    }
}

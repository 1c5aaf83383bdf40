//! JSON encoding on top of `SessionStore`.
//!
//! A value that fails to decode is treated as absent and its key is cleared,
//! so a corrupt entry never blocks startup.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{SessionStore, StorageError, StoreKey};

/// Read and decode the value under `key`.
///
/// Returns `Ok(None)` when the key is missing or its value is malformed; in
/// the latter case the key is removed.
///
/// # Errors
///
/// Returns `StorageError` only when the backend itself fails.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: StoreKey,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "discarding malformed stored value");
            store.remove(key).await?;
            Ok(None)
        }
    }
}

/// Encode `value` and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails, or a backend error.
pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn SessionStore,
    key: StoreKey,
    value: &T,
) -> Result<(), StorageError> {
    let raw =
        serde_json::to_string(value).map_err(|err| StorageError::Serialization(err.to_string()))?;
    store.put(key, &raw).await
}

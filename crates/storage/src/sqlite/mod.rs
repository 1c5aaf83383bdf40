//! `SQLite` backend for the session store.
//!
//! Every [`StoreKey`](crate::repository::StoreKey) maps to one row of the
//! `kv_store` table holding its raw JSON text.

use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{SessionStore, Storage};

mod kv_repo;
mod migrate;

const POOL_SIZE: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Session keys persisted in a `SQLite` database.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

/// Failure while opening the database or bringing its schema up to date.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteKvStore {
    /// Open the database at `database_url`.
    ///
    /// Pooled connections run in WAL mode and wait up to five seconds on a
    /// locked database.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened or a connection PRAGMA is refused.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqlitePoolOptions::new()
            .max_connections(POOL_SIZE)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA busy_timeout = 5000;"] {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            });
        let pool = options.connect(database_url).await?;
        tracing::debug!(database_url, "session database opened");
        Ok(Self { pool })
    }

    /// Underlying pool, for ad hoc queries in tests and tooling.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring `schema_migrations` and `kv_store` up to the current version.
    ///
    /// Safe to call on every start; applied versions are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the first failing migration statement.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Open `database_url`, migrate it, and serve the current user, the
    /// result log and the generation settings from it.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` when the database cannot be opened or
    /// migrated.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let store = SqliteKvStore::connect(database_url).await?;
        store.migrate().await?;
        Ok(Self {
            session: Arc::new(store) as Arc<dyn SessionStore>,
        })
    }
}

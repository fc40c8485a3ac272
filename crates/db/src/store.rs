//! The local cache handle.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::changes::{ChangeBus, Table};
use crate::error::StoreError;
use crate::live::{CancelHandle, LiveQuery};

/// Maximum pooled connections for a file-backed store.
const MAX_CONNECTIONS: u32 = 5;

/// SQLite pool plus the change bus that feeds live queries.
///
/// Cloning is cheap; all clones share the pool and the bus.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
    changes: Arc<ChangeBus>,
}

impl LocalStore {
    /// Open (creating if missing) a file-backed store and apply migrations.
    ///
    /// * `url` - e.g. `sqlite://taskhub.db`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        crate::run_migrations(&pool).await?;
        tracing::debug!(url, "Local store opened");
        Ok(Self::from_pool(pool))
    }

    /// Open a private in-memory store and apply migrations.
    ///
    /// SQLite gives every connection its own memory database, so the pool is
    /// pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        crate::run_migrations(&pool).await?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an already-migrated pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: Arc::new(ChangeBus::default()),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Publish that `tables` were written. Call only after the write commits.
    pub fn notify(&self, tables: &[Table]) {
        for &table in tables {
            self.changes.publish(table);
        }
    }

    /// Subscribe to raw table change notifications.
    pub fn changes(&self) -> broadcast::Receiver<Table> {
        self.changes.subscribe()
    }

    /// Start a live query that re-runs `query` whenever one of `tables`
    /// changes.
    pub fn live<T, F, Fut>(&self, tables: &[Table], query: F) -> LiveQuery<T>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(LocalStore) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        LiveQuery::spawn(self.clone(), tables, query)
    }

    /// Callback form of [`LocalStore::live`]: `on_change` receives the
    /// latest result and every later change until the handle is cancelled.
    pub fn subscribe<T, F, Fut, C>(&self, tables: &[Table], query: F, on_change: C) -> CancelHandle
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(LocalStore) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
        C: FnMut(T) + Send + 'static,
    {
        let live = self.live(tables, query);
        let subscription = live.subscribe(on_change);
        // The callback keeps its own handle on the query; cancelling the
        // subscription must stop the query task as well.
        let query_cancel = live.cancel_handle();
        let token = subscription.token();
        tokio::spawn(async move {
            token.cancelled().await;
            query_cancel.cancel();
        });
        subscription
    }
}

//! On-device cache for the taskhub synchronization layer.
//!
//! - [`LocalStore`] — SQLite pool plus the change bus.
//! - [`stores`] — per-table upsert / delete / query operations.
//! - [`LiveQuery`] — continuously re-evaluated queries with replay-latest.
//! - [`models`] — row structs and their conversion into domain entities.

pub mod changes;
pub mod error;
pub mod live;
pub mod models;
pub mod store;
pub mod stores;

pub use changes::{ChangeBus, Table};
pub use error::StoreError;
pub use live::{CancelHandle, LiveQuery};
pub use store::LocalStore;

pub type DbPool = sqlx::SqlitePool;

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Verify the cache answers queries.
pub async fn health_check(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

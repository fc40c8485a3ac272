use taskhub_core::error::SyncError;

/// Errors raised by the local cache.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A query or write failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations could not be applied.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::Storage(err.to_string())
    }
}

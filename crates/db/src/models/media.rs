use sqlx::FromRow;
use taskhub_core::models::Media;
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow)]
pub struct MediaRow {
    pub id: DbId,
    pub filename: String,
    pub media_type: String,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MediaRow> for Media {
    fn from(row: MediaRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename,
            media_type: row.media_type,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

//! Store for the `users` table.

use sqlx::SqliteConnection;
use taskhub_core::models::User;
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::user::UserRow;
use crate::store::LocalStore;

/// Column list for `users` queries.
pub(crate) const COLUMNS: &str = "id, fullname, username, email, avatar, created_at, updated_at";

/// Cache operations for users.
pub struct UserStore;

impl UserStore {
    pub async fn upsert(store: &LocalStore, user: &User) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(user)).await
    }

    /// Insert or replace every user in one transaction.
    pub async fn upsert_many(store: &LocalStore, users: &[User]) -> Result<(), StoreError> {
        if users.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for user in users {
            Self::upsert_in(&mut *tx, user).await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Users]);
        Ok(())
    }

    /// Upsert inside a caller-owned transaction. The caller notifies.
    pub(crate) async fn upsert_in(conn: &mut SqliteConnection, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, fullname, username, email, avatar, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (id) DO UPDATE SET \
                 fullname = excluded.fullname, \
                 username = excluded.username, \
                 email = excluded.email, \
                 avatar = excluded.avatar, \
                 created_at = excluded.created_at, \
                 updated_at = excluded.updated_at",
        )
        .bind(user.id)
        .bind(user.fullname.as_str())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.avatar.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(store.pool())
            .await?;
        Ok(row.map(User::from))
    }
}

use std::sync::Arc;

use taskhub_core::auth::AuthContext;
use taskhub_core::error::SyncError;
use taskhub_core::models::{Bookmark, Task};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::{BookmarkStore, TaskStore};
use taskhub_db::{LocalStore, Table};
use taskhub_remote::{BookmarkApi, TaskApi};

use super::log_mirror_failure;
use crate::resource_stream::{for_each_session, refresh_then_watch, ResourceStream};

/// Bookmarks of the signed-in user.
///
/// Reads follow the session: signing in as another user restarts them, and
/// with no user signed in they report an error.
#[derive(Clone)]
pub struct BookmarkRepository {
    store: LocalStore,
    bookmarks: Arc<dyn BookmarkApi>,
    tasks: Arc<dyn TaskApi>,
    auth: AuthContext,
}

impl BookmarkRepository {
    pub fn new(
        store: LocalStore,
        bookmarks: Arc<dyn BookmarkApi>,
        tasks: Arc<dyn TaskApi>,
        auth: AuthContext,
    ) -> Self {
        Self {
            store,
            bookmarks,
            tasks,
            auth,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Bookmarked tasks, most recently bookmarked first.
    ///
    /// Bookmarked tasks missing from the cache are fetched individually.
    pub fn get_user_bookmarks(&self) -> ResourceStream<Vec<Task>> {
        let store = self.store.clone();
        let bookmarks = Arc::clone(&self.bookmarks);
        let tasks = Arc::clone(&self.tasks);
        let auth = self.auth.clone();

        ResourceStream::spawn(move |out| async move {
            let session_out = out.clone();
            for_each_session(&auth, &out, move |user_id| {
                let store = store.clone();
                let bookmarks = Arc::clone(&bookmarks);
                let tasks = Arc::clone(&tasks);
                let out = session_out.clone();

                async move {
                    let refresh = async {
                        let rows = bookmarks.list_bookmarks().await?;
                        BookmarkStore::upsert_many(&store, &rows).await?;

                        for task_id in BookmarkStore::missing_task_ids(&store, user_id).await? {
                            match tasks.get_task(task_id).await {
                                Ok(task) => TaskStore::upsert(&store, &task).await?,
                                Err(e) => {
                                    tracing::warn!(task_id, error = %e, "Failed to fetch bookmarked task");
                                }
                            }
                        }
                        Ok::<_, SyncError>(())
                    };
                    refresh_then_watch(
                        &out,
                        &store,
                        "bookmarks",
                        &[Table::Bookmarks, Table::Tasks],
                        refresh,
                        move |store| async move { TaskStore::list_bookmarked(&store, user_id).await },
                        move |rows| {
                            Resource::from_collection(rows, || {
                                format!("No bookmark found for user with ID: {user_id}")
                            })
                        },
                    )
                    .await;
                }
            })
            .await;
        })
    }

    /// Whether the signed-in user has bookmarked `task_id`.
    ///
    /// A server 404 clears a stale cached bookmark; "not bookmarked" is
    /// `Success(false)`, never an error.
    pub fn is_bookmarked(&self, task_id: DbId) -> ResourceStream<bool> {
        let store = self.store.clone();
        let bookmarks = Arc::clone(&self.bookmarks);
        let auth = self.auth.clone();

        ResourceStream::spawn(move |out| async move {
            let session_out = out.clone();
            for_each_session(&auth, &out, move |user_id| {
                let store = store.clone();
                let bookmarks = Arc::clone(&bookmarks);
                let out = session_out.clone();

                async move {
                    let refresh = async {
                        match bookmarks.get_bookmark(task_id).await {
                            Ok(bookmark) => BookmarkStore::upsert(&store, &bookmark).await?,
                            Err(e) if e.is_not_found() => {
                                BookmarkStore::delete(&store, user_id, task_id).await?;
                            }
                            Err(e) => return Err(SyncError::from(e)),
                        }
                        Ok::<_, SyncError>(())
                    };
                    refresh_then_watch(
                        &out,
                        &store,
                        "bookmark",
                        &[Table::Bookmarks],
                        refresh,
                        move |store| async move { BookmarkStore::exists(&store, user_id, task_id).await },
                        Resource::Success,
                    )
                    .await;
                }
            })
            .await;
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_bookmark(&self, task_id: DbId) -> Result<Bookmark, SyncError> {
        let user_id = self.auth.current_user_id()?;
        let bookmark = self.bookmarks.create_bookmark(task_id).await?;
        log_mirror_failure(BookmarkStore::upsert(&self.store, &bookmark).await, "bookmark", task_id);
        tracing::debug!(user_id, task_id, "Bookmark created");
        Ok(bookmark)
    }

    pub async fn delete_bookmark(&self, task_id: DbId) -> Result<Bookmark, SyncError> {
        let user_id = self.auth.current_user_id()?;
        let bookmark = self.bookmarks.delete_bookmark(task_id).await?;
        log_mirror_failure(
            BookmarkStore::delete(&self.store, user_id, task_id).await,
            "bookmark",
            task_id,
        );
        Ok(bookmark)
    }
}

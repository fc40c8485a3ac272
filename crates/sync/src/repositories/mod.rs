//! Synchronizing repositories, one per aggregate.
//!
//! Reads are cache-first: they return a [`ResourceStream`] that starts with
//! `Loading`, refreshes the cache from the server on a best-effort basis,
//! and then follows a live query over the cache. Writes go to the server
//! first and are mirrored into the cache only after the server accepts
//! them; a rejected write leaves the cache untouched.
//!
//! [`ResourceStream`]: crate::ResourceStream

mod bookmark_repository;
mod comment_repository;
mod media_repository;
mod member_role_repository;
mod project_repository;
mod tag_repository;
mod task_repository;
mod workspace_member_repository;
mod workspace_repository;

pub use bookmark_repository::BookmarkRepository;
pub use comment_repository::CommentRepository;
pub use media_repository::MediaRepository;
pub use member_role_repository::MemberRoleRepository;
pub use project_repository::ProjectRepository;
pub use tag_repository::TagRepository;
pub use task_repository::TaskRepository;
pub use workspace_member_repository::WorkspaceMemberRepository;
pub use workspace_repository::WorkspaceRepository;

use taskhub_core::types::DbId;
use taskhub_db::StoreError;

/// Log a cache write that failed after the server accepted the change.
///
/// The server is authoritative, so the write is still reported as
/// successful; the next refresh of the same key repairs the cache.
fn log_mirror_failure<T>(result: Result<T, StoreError>, entity: &'static str, id: DbId) {
    if let Err(e) = result {
        tracing::warn!(entity, id, error = %e, "Failed to mirror server write into local cache");
    }
}

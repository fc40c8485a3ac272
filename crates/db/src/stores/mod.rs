//! Per-table store operations.
//!
//! Each store is a zero-sized type whose async methods take the
//! [`LocalStore`](crate::LocalStore) handle. Writes are keyed
//! insert-or-replace and delete statements; batches run in one transaction
//! and the touched tables are published on the change bus after commit.

pub mod bookmark_store;
pub mod comment_store;
pub mod media_store;
pub mod member_store;
pub mod project_store;
pub mod tag_store;
pub mod task_store;
pub mod user_store;
pub mod workspace_store;

pub use bookmark_store::BookmarkStore;
pub use comment_store::CommentStore;
pub use media_store::MediaStore;
pub use member_store::{MemberRoleStore, WorkspaceMemberStore};
pub use project_store::ProjectStore;
pub use tag_store::TagStore;
pub use task_store::TaskStore;
pub use user_store::UserStore;
pub use workspace_store::WorkspaceStore;

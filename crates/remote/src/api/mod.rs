//! One object-safe trait per entity endpoint group.
//!
//! Paths are relative to the API root. Collection endpoints are nested under
//! their parent with a one-letter segment: `w` (workspace), `p` (project),
//! `t` (task).

mod bookmark;
mod comment;
mod media;
mod member;
mod project;
mod tag;
mod task;
mod workspace;

pub use bookmark::BookmarkApi;
pub use comment::CommentApi;
pub use media::MediaApi;
pub use member::{MemberRoleApi, WorkspaceMemberApi};
pub use project::ProjectApi;
pub use tag::TagApi;
pub use task::TaskApi;
pub use workspace::WorkspaceApi;

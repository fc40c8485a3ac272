//! Canonical domain entities.
//!
//! One type per entity is shared by the wire, the cache, and consumers.
//! Serde attributes describe the wire shape (camelCase JSON); the local
//! store keeps its own row structs and converts into these types.
//!
//! Each submodule contains:
//! - The entity struct
//! - Input DTOs for create/update requests, validated before any I/O
//! - Join rows for the entity's many-to-many relations

pub mod bookmark;
pub mod comment;
pub mod media;
pub mod member;
pub mod project;
pub mod tag;
pub mod task;
pub mod user;
pub mod workspace;

pub use bookmark::Bookmark;
pub use comment::{Comment, CommentInput};
pub use media::{Media, TaskMedia};
pub use member::{Member, MemberDetails, MemberInput, MemberRole, MemberRoleInput, WorkspaceMember};
pub use project::{Project, ProjectInput};
pub use tag::{Color, Tag, TagInput, TaskTag};
pub use task::{Task, TaskAssigned, TaskInput, TaskStatus};
pub use user::User;
pub use workspace::{Workspace, WorkspaceInput};

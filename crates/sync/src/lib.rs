//! Synchronizing repositories for the taskhub client.
//!
//! Each repository mediates between the remote API (`taskhub-remote`) and
//! the on-device cache (`taskhub-db`):
//!
//! - reads return a [`ResourceStream`]: `Loading`, then live cached data as
//!   `Success` or `Error`, deduplicated;
//! - writes hit the server first and mirror into the cache on success;
//! - [`PermissionEvaluator`] checks roles against the server.

pub mod config;
pub mod permissions;
pub mod repositories;
pub mod resource_stream;

use std::sync::Arc;

use taskhub_core::auth::AuthContext;
use taskhub_db::LocalStore;
use taskhub_remote::ApiClient;

pub use config::{ConfigError, SyncConfig};
pub use permissions::PermissionEvaluator;
pub use repositories::{
    BookmarkRepository, CommentRepository, MediaRepository, MemberRoleRepository,
    ProjectRepository, TagRepository, TaskRepository, WorkspaceMemberRepository,
    WorkspaceRepository,
};
pub use resource_stream::{ResourceSender, ResourceStream};

/// Every repository wired to one store, one API client, and one session.
#[derive(Clone)]
pub struct Repositories {
    pub workspaces: WorkspaceRepository,
    pub projects: ProjectRepository,
    pub tasks: TaskRepository,
    pub tags: TagRepository,
    pub comments: CommentRepository,
    pub media: MediaRepository,
    pub bookmarks: BookmarkRepository,
    pub member_roles: MemberRoleRepository,
    pub members: WorkspaceMemberRepository,
    pub permissions: PermissionEvaluator,
}

impl Repositories {
    pub fn new(store: LocalStore, client: ApiClient, auth: AuthContext) -> Self {
        let api = Arc::new(client);
        let member_roles = MemberRoleRepository::new(store.clone(), api.clone());

        Self {
            workspaces: WorkspaceRepository::new(store.clone(), api.clone(), auth.clone()),
            projects: ProjectRepository::new(store.clone(), api.clone()),
            tasks: TaskRepository::new(store.clone(), api.clone()),
            tags: TagRepository::new(store.clone(), api.clone()),
            comments: CommentRepository::new(store.clone(), api.clone()),
            media: MediaRepository::new(store.clone(), api.clone()),
            bookmarks: BookmarkRepository::new(store.clone(), api.clone(), api.clone(), auth),
            permissions: PermissionEvaluator::new(member_roles.clone()),
            member_roles,
            members: WorkspaceMemberRepository::new(store, api),
        }
    }
}

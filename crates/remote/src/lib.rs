//! HTTP client for the taskhub REST API.
//!
//! Every endpoint wraps its payload in an [`ApiEnvelope`]. [`ApiClient`]
//! unwraps it and implements one object-safe trait per entity (see [`api`])
//! so the synchronizing repositories can be driven by fakes in tests.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;

pub use api::{
    BookmarkApi, CommentApi, MediaApi, MemberRoleApi, ProjectApi, TagApi, TaskApi, WorkspaceApi,
    WorkspaceMemberApi,
};
pub use client::ApiClient;
pub use envelope::ApiEnvelope;
pub use error::RemoteError;

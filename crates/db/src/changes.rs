//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! Every committed write publishes the [`Table`]s it touched. Live queries
//! subscribe to the bus and re-run when one of their tables changes.

use std::fmt;

use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A cache table whose writes are observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Workspaces,
    Projects,
    Tasks,
    Tags,
    TaskTags,
    Comments,
    Media,
    TaskMedia,
    Users,
    TaskAssigned,
    Bookmarks,
    MemberRoles,
    WorkspaceMembers,
    UserWorkspaces,
}

impl Table {
    /// SQL table name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workspaces => "workspaces",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Tags => "tags",
            Self::TaskTags => "task_tags",
            Self::Comments => "comments",
            Self::Media => "media",
            Self::TaskMedia => "task_media",
            Self::Users => "users",
            Self::TaskAssigned => "task_assigned",
            Self::Bookmarks => "bookmarks",
            Self::MemberRoles => "member_roles",
            Self::WorkspaceMembers => "workspace_members",
            Self::UserWorkspaces => "user_workspaces",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of table change notifications.
///
/// Slow receivers observe `RecvError::Lagged`; live queries treat that as
/// "something changed" and re-run.
#[derive(Debug)]
pub struct ChangeBus {
    sender: broadcast::Sender<Table>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to every current subscriber.
    ///
    /// With no subscribers the notification is dropped.
    pub fn publish(&self, table: Table) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(table);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Table> {
        self.sender.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

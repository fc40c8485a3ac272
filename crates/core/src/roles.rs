//! Member roles, their total order, and the scopes they apply to.
//!
//! Roles are ordered `Reader < Collaborator < Administrator`; a user holding
//! a role satisfies every requirement at or below it. Unknown role names
//! received from the server decode to the lowest role so that a newer server
//! can never grant more than it intended to an older client.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::DbId;

pub const ROLE_READER: &str = "READER";
pub const ROLE_COLLABORATOR: &str = "COLLABORATOR";
pub const ROLE_ADMINISTRATOR: &str = "ADMINISTRATOR";

/// Member role, declared in ascending privilege order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Role {
    #[default]
    Reader = 0,
    Collaborator = 1,
    Administrator = 2,
}

impl Role {
    /// Position in the privilege order.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reader => ROLE_READER,
            Self::Collaborator => ROLE_COLLABORATOR,
            Self::Administrator => ROLE_ADMINISTRATOR,
        }
    }

    /// Parse a role name case-insensitively, falling back to [`Role::Reader`].
    pub fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            ROLE_COLLABORATOR => Self::Collaborator,
            ROLE_ADMINISTRATOR => Self::Administrator,
            _ => Self::Reader,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values such as null or numbers take the fallback too.
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(raw.as_str().unwrap_or_default()))
    }
}

/// Returns `true` when `actual` meets or exceeds `minimum`.
pub fn has_sufficient_permissions(actual: Role, minimum: Role) -> bool {
    actual.ordinal() >= minimum.ordinal()
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// The resource a member role applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleScope {
    Workspace(DbId),
    Project(DbId),
    Task(DbId),
}

impl RoleScope {
    /// Pick the scope from a set of optional ids.
    ///
    /// Precedence is workspace, then project, then task. Returns `None` when
    /// no id is provided.
    pub fn from_ids(
        workspace_id: Option<DbId>,
        project_id: Option<DbId>,
        task_id: Option<DbId>,
    ) -> Option<Self> {
        workspace_id
            .map(Self::Workspace)
            .or(project_id.map(Self::Project))
            .or(task_id.map(Self::Task))
    }

    /// Single-letter path segment used by the members endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Workspace(_) => "w",
            Self::Project(_) => "p",
            Self::Task(_) => "t",
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Self::Workspace(id) | Self::Project(id) | Self::Task(id) => id,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Self::Workspace(_) => "workspace",
            Self::Project(_) => "project",
            Self::Task(_) => "task",
        }
    }
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

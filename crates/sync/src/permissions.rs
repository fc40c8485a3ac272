//! Role checks against the server-reported member role.
//!
//! The role is fetched on every check and a failed fetch denies access.

use taskhub_core::error::SyncError;
use taskhub_core::resource::Resource;
use taskhub_core::roles::{self, Role, RoleScope};
use taskhub_core::types::DbId;

use crate::repositories::MemberRoleRepository;

/// Message reported when a check names no scope at all.
pub const NO_ID_PROVIDED: &str = "No ID provided for role check";

/// Answers "does the signed-in user hold at least role X here?".
#[derive(Clone)]
pub struct PermissionEvaluator {
    roles: MemberRoleRepository,
}

impl PermissionEvaluator {
    pub fn new(roles: MemberRoleRepository) -> Self {
        Self { roles }
    }

    /// Check the role at the first present scope (workspace, then project,
    /// then task) against `minimum`.
    ///
    /// - no id: `Error("No ID provided for role check")`
    /// - fetch failure: `Error(<failure message>)`
    /// - otherwise: `Success(actual >= minimum)`
    pub async fn has_sufficient_permissions(
        &self,
        workspace_id: Option<DbId>,
        project_id: Option<DbId>,
        task_id: Option<DbId>,
        minimum: Role,
    ) -> Resource<bool> {
        let Some(scope) = RoleScope::from_ids(workspace_id, project_id, task_id) else {
            return Resource::error(NO_ID_PROVIDED);
        };

        match self.role_at(scope).await {
            Ok(actual) => Resource::Success(roles::has_sufficient_permissions(actual, minimum)),
            Err(e) => {
                tracing::warn!(scope = %scope, error = %e, "Role check failed, denying");
                Resource::Error(e.to_string())
            }
        }
    }

    /// Fail with [`SyncError::Permission`] unless the user holds at least
    /// `minimum` at `scope`. Fetch errors are propagated.
    pub async fn require(&self, scope: RoleScope, minimum: Role) -> Result<(), SyncError> {
        let actual = self.role_at(scope).await?;
        if !roles::has_sufficient_permissions(actual, minimum) {
            return Err(SyncError::Permission(format!(
                "{minimum} role required on {scope}, have {actual}"
            )));
        }
        Ok(())
    }

    pub async fn role_at(&self, scope: RoleScope) -> Result<Role, SyncError> {
        Ok(self.roles.get_role(scope).await?.role)
    }
}

use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::MemberRole;
use taskhub_core::roles::RoleScope;
use taskhub_db::stores::MemberRoleStore;
use taskhub_db::LocalStore;
use taskhub_remote::MemberRoleApi;

use super::log_mirror_failure;

/// The signed-in user's role at a scope.
///
/// Roles gate writes, so they are always fetched from the server; the cache
/// copy is written for display only and never read back here.
#[derive(Clone)]
pub struct MemberRoleRepository {
    store: LocalStore,
    api: Arc<dyn MemberRoleApi>,
}

impl MemberRoleRepository {
    pub fn new(store: LocalStore, api: Arc<dyn MemberRoleApi>) -> Self {
        Self { store, api }
    }

    pub async fn get_role(&self, scope: RoleScope) -> Result<MemberRole, SyncError> {
        let role = self.api.get_member_role(scope).await?;
        log_mirror_failure(MemberRoleStore::upsert(&self.store, &role).await, "member_role", role.id);
        tracing::debug!(scope = %scope, role = %role.role, "Fetched member role");
        Ok(role)
    }
}

//! Session holder shared by the remote client and the repositories.
//!
//! The authentication flow itself lives outside this workspace; it writes the
//! current session through [`AuthContext::set_session`] and
//! [`AuthContext::clear`]. Everything else only reads.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::SyncError;
use crate::types::DbId;

/// Message used when an operation needs a user and none is signed in.
pub const NO_AUTHENTICATED_USER: &str = "No authenticated user";

/// Reactive handle over the current user id and bearer token.
///
/// Cloning is cheap; all clones observe the same session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    user_id_tx: Arc<watch::Sender<Option<DbId>>>,
    token_tx: Arc<watch::Sender<Option<String>>>,
}

impl AuthContext {
    /// Create a context with no signed-in user.
    pub fn new() -> Self {
        let (user_id_tx, _) = watch::channel(None);
        let (token_tx, _) = watch::channel(None);
        Self {
            user_id_tx: Arc::new(user_id_tx),
            token_tx: Arc::new(token_tx),
        }
    }

    /// Create a context already holding a session.
    pub fn with_session(user_id: DbId, token: impl Into<String>) -> Self {
        let ctx = Self::new();
        ctx.set_session(user_id, token);
        ctx
    }

    /// Replace the current session.
    pub fn set_session(&self, user_id: DbId, token: impl Into<String>) {
        self.user_id_tx.send_replace(Some(user_id));
        self.token_tx.send_replace(Some(token.into()));
    }

    /// Sign out.
    pub fn clear(&self) {
        self.user_id_tx.send_replace(None);
        self.token_tx.send_replace(None);
    }

    /// The signed-in user id, or a permission error when nobody is signed in.
    pub fn current_user_id(&self) -> Result<DbId, SyncError> {
        self.user_id_tx
            .borrow()
            .ok_or_else(|| SyncError::Permission(NO_AUTHENTICATED_USER.into()))
    }

    /// The bearer token, if any.
    pub fn auth_token(&self) -> Option<String> {
        self.token_tx.borrow().clone()
    }

    /// Observe user id changes.
    pub fn watch_user_id(&self) -> watch::Receiver<Option<DbId>> {
        self.user_id_tx.subscribe()
    }

    /// Observe token changes.
    pub fn watch_auth_token(&self) -> watch::Receiver<Option<String>> {
        self.token_tx.subscribe()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

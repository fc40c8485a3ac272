//! Error taxonomy shared by every layer of the synchronization stack.
//!
//! Crate-local errors (`RemoteError`, `StoreError`) convert into
//! [`SyncError`] at the repository boundary, so write callers only ever see
//! this type.

/// Failure of a repository operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The server could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The server payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A query legitimately returned nothing.
    #[error("{0}")]
    NotFound(String),

    /// No authenticated user, or the user's role is insufficient.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Input rejected before contacting the server.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The local cache failed to read or write.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<validator::ValidationErrors> for SyncError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SyncError::Validation(errors.to_string())
    }
}

impl SyncError {
    /// Returns `true` when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SyncError::NotFound(_) | SyncError::Server { status: 404, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_includes_status() {
        let err = SyncError::Server {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "Server error (503): maintenance");
    }

    #[test]
    fn not_found_displays_bare_message() {
        let err = SyncError::NotFound("No tag found with ID: 3".into());
        assert_eq!(err.to_string(), "No tag found with ID: 3");
        assert!(err.is_not_found());
    }

    #[test]
    fn http_404_counts_as_not_found() {
        let err = SyncError::Server {
            status: 404,
            message: "missing".into(),
        };
        assert!(err.is_not_found());
        assert!(!SyncError::Network("offline".into()).is_not_found());
    }
}

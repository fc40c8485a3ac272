use taskhub_core::error::SyncError;

/// Errors from the remote API layer.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx HTTP status, or a 2xx response whose envelope reports a
    /// non-2xx `statusCode`.
    #[error("API error ({status}): {message}")]
    Server {
        status: u16,
        /// Envelope message when decodable, raw body otherwise.
        message: String,
    },

    /// The payload could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Network(e) => SyncError::Network(e.to_string()),
            RemoteError::Server { status, message } => SyncError::Server { status, message },
            RemoteError::Decode(e) => SyncError::Decode(e.to_string()),
        }
    }
}

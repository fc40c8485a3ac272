//! The `{statusCode, message, content}` wrapper around every response.

use serde::de::{DeserializeOwned, Error as _, IgnoredAny};
use serde::Deserialize;

use crate::error::RemoteError;

/// Response wrapper returned by every endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    /// Absent or `null` on most error responses.
    pub content: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the content, failing on a non-2xx envelope status or a
    /// missing payload.
    pub fn into_content(self) -> Result<T, RemoteError> {
        if !(200..300).contains(&self.status_code) {
            return Err(RemoteError::Server {
                status: self.status_code,
                message: self.message,
            });
        }
        self.content
            .ok_or_else(|| serde_json::Error::custom("envelope has no content").into())
    }
}

/// Decode a response body received with HTTP status `status`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, RemoteError> {
    if !(200..300).contains(&status) {
        return Err(RemoteError::Server {
            status,
            message: error_message(body),
        });
    }
    let envelope: ApiEnvelope<T> = serde_json::from_slice(body)?;
    envelope.into_content()
}

/// The envelope message of an error body, or the raw body text.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ApiEnvelope<IgnoredAny>>(body) {
        Ok(envelope) if !envelope.message.is_empty() => envelope.message,
        _ => String::from_utf8_lossy(body).into_owned(),
    }
}

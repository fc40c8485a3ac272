//! [`ApiClient`]: the reqwest-backed implementation of every API trait.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use taskhub_core::auth::AuthContext;

use crate::envelope::decode_response;
use crate::error::RemoteError;

/// HTTP client for one taskhub API server.
///
/// Attaches the current bearer token from the [`AuthContext`] to every
/// request and unwraps the response envelope.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url` - API root, e.g. `http://localhost:8080/api`.
    /// * `timeout` - per-request timeout applied by the transport.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        auth: AuthContext,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, auth))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, auth: AuthContext) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- request helpers ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        self.send(self.client.get(self.url(path))).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// `POST` without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        self.send(self.client.post(self.url(path))).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        self.send(self.client.delete(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach credentials, send, and decode the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let request = match self.auth.auth_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        let result = decode_response(status, &body);
        if let Err(e) = &result {
            tracing::debug!(status, url = %url, error = %e, "API request failed");
        }
        result
    }
}

use std::time::Duration;

/// Default API root for local development.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Default on-device cache location.
const DEFAULT_DATABASE_URL: &str = "sqlite://taskhub.db";

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Synchronization layer configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// API root without a trailing slash.
    pub api_base_url: String,
    /// SQLite URL of the local cache.
    pub database_url: String,
    /// Transport timeout for every API request.
    pub request_timeout_secs: u64,
}

impl SyncConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `API_BASE_URL`         | `http://localhost:8080/api` |
    /// | `DATABASE_URL`         | `sqlite://taskhub.db`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url,
            database_url,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

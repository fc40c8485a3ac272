//! Tri-state result delivered by every repository read.
//!
//! A read stream starts with [`Resource::Loading`] and then carries either
//! [`Resource::Success`] with the current cached data or [`Resource::Error`]
//! with a human-readable message. There is no idle or cancelled state:
//! consumers stop observing by dropping the stream.

use serde::Serialize;

/// Loading / Success / Error result of a continuous read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    /// Build an error resource from anything displayable.
    pub fn error(message: impl Into<String>) -> Self {
        Resource::Error(message.into())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Resource::Error(_))
    }

    /// Borrow the success payload, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            Resource::Loading | Resource::Error(_) => None,
        }
    }

    /// Consume the resource and return the success payload, if any.
    pub fn into_success(self) -> Option<T> {
        match self {
            Resource::Success(data) => Some(data),
            Resource::Loading | Resource::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            Resource::Loading | Resource::Success(_) => None,
        }
    }

    /// Transform the success payload, leaving the other states untouched.
    pub fn map<U, F>(self, f: F) -> Resource<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Error(message) => Resource::Error(message),
        }
    }

    /// Collapse an optional payload: `None` becomes `Error(message)`.
    pub fn from_option(value: Option<T>, message: impl FnOnce() -> String) -> Self {
        match value {
            Some(data) => Resource::Success(data),
            None => Resource::Error(message()),
        }
    }
}

impl<T> Resource<Vec<T>> {
    /// Collapse a collection: empty becomes `Error(message)`.
    pub fn from_collection(rows: Vec<T>, message: impl FnOnce() -> String) -> Self {
        if rows.is_empty() {
            Resource::Error(message())
        } else {
            Resource::Success(rows)
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Resource<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Error(e.to_string()),
        }
    }
}

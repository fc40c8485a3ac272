//! User entity.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub fullname: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

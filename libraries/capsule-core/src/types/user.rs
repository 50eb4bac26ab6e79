/// User domain type
use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// A person who signed in through the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Identity provider account id (natural key for login)
    pub github_id: i64,

    /// Provider handle
    pub login: String,

    /// Display name
    pub name: String,

    /// Profile image URL
    pub avatar_url: String,
}

/// Data for creating a user on first login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub github_id: i64,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
}

//! Error types for the identity exchange.

use std::fmt;
use thiserror::Error;

/// One field of the provider profile that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ProfileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur while authenticating against the identity provider.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The provider rejected the request or returned something unusable
    #[error("Identity provider error: {0}")]
    Upstream(String),

    /// HTTP transport failure
    #[error("Identity provider unreachable: {0}")]
    Request(#[from] reqwest::Error),

    /// The profile did not match the expected shape
    #[error("Invalid provider profile: {}", join_issues(.0))]
    InvalidProfile(Vec<ProfileIssue>),

    /// Client misconfiguration (bad endpoint URL)
    #[error("Invalid identity provider configuration: {0}")]
    Config(String),
}

fn join_issues(issues: &[ProfileIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

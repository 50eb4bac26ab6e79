//! Capsule Identity
//!
//! Turns an OAuth authorization code into a verified GitHub profile.
//!
//! # Flow
//!
//! 1. **Token exchange**: `code` → access token at the provider's token endpoint
//! 2. **Profile fetch**: bearer-authenticated `GET /user`
//! 3. **Normalization**: the profile must have an integer `id`, string
//!    `login` and `name`, and a valid `avatar_url`; anything else is rejected
//!    so a malformed profile never reaches storage
//!
//! No step is retried; the first failure is returned to the caller.
//!
//! # Example
//!
//! ```ignore
//! use capsule_identity::{GitHubClient, GitHubConfig, IdentityProvider};
//!
//! let client = GitHubClient::new(GitHubConfig::new("client-id", "client-secret"))?;
//! let profile = client.authenticate("code-from-redirect").await?;
//! println!("Signed in as {}", profile.login);
//! ```

mod error;
mod github;
mod provider;
mod types;

pub use error::{IdentityError, ProfileIssue, Result};
pub use github::GitHubClient;
pub use provider::IdentityProvider;
pub use types::{GitHubConfig, Profile};

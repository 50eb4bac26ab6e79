use crate::error::Result;
use crate::types::Profile;
use async_trait::async_trait;

/// Something that can turn an authorization code into a profile.
///
/// The server depends on this trait rather than on [`GitHubClient`](crate::GitHubClient)
/// so the registration flow can run against a stand-in provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange `code` for an access token and fetch the normalized profile.
    async fn authenticate(&self, code: &str) -> Result<Profile>;
}

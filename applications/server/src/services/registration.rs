/// Login flow: provider code -> profile -> user -> session token
use crate::{
    error::{Result, ServerError},
    services::SessionService,
};
use capsule_core::{
    storage::Storage,
    types::{NewUser, User},
};
use capsule_identity::{IdentityProvider, Profile};
use tracing::{debug, info};

/// Run the whole login for one authorization code and return a session token
///
/// Nothing is written if the identity provider fails.
pub async fn register(
    identity: &dyn IdentityProvider,
    storage: &dyn Storage,
    sessions: &SessionService,
    code: &str,
) -> Result<String> {
    let profile = identity.authenticate(code).await?;
    let user = resolve_user(storage, profile).await?;

    let token = sessions.issue(&user)?;
    info!(user_id = %user.id, github_id = user.github_id, "Session issued");

    Ok(token)
}

/// Find the user for a provider profile, creating it on first login
///
/// A concurrent first login for the same account can win the insert; the
/// loser sees a conflict and picks up the winner's row instead.
pub async fn resolve_user(storage: &dyn Storage, profile: Profile) -> Result<User> {
    let github_id = profile.id;

    if let Some(user) = storage.find_user_by_github_id(github_id).await? {
        debug!(user_id = %user.id, github_id, "Existing user");
        return Ok(user);
    }

    match storage.create_user(NewUser::from(profile)).await {
        Ok(user) => {
            info!(user_id = %user.id, github_id, "Created user on first login");
            Ok(user)
        }
        Err(e) if e.is_conflict() => {
            debug!(github_id, "Lost first-login race, re-reading user");
            storage
                .find_user_by_github_id(github_id)
                .await?
                .ok_or_else(|| {
                    ServerError::Internal(format!(
                        "user for github id {} conflicted but is missing",
                        github_id
                    ))
                })
        }
        Err(e) => Err(e.into()),
    }
}

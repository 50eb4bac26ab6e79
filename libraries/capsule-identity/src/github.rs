//! GitHub OAuth client.

use crate::error::{IdentityError, Result};
use crate::provider::IdentityProvider;
use crate::types::{GitHubConfig, Profile, TokenResponse};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the GitHub OAuth web flow.
///
/// Holds a single `reqwest::Client`; share it behind an `Arc`.
pub struct GitHubClient {
    http: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new client with the given credentials and endpoints.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        for url in [&config.token_url, &config.api_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(IdentityError::Config(format!(
                    "URL must start with http:// or https://: {}",
                    url
                )));
            }
        }

        let config = GitHubConfig {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            ..config
        };

        // GitHub's API rejects requests without a User-Agent
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Capsule/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String> {
        debug!(url = %self.config.token_url, "Exchanging authorization code");

        let response = self
            .http
            .post(&self.config.token_url)
            .query(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
            ])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Token exchange rejected");
            return Err(IdentityError::Upstream(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            IdentityError::Upstream(format!("Failed to parse token response: {}", e))
        })?;

        match body.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => {
                let reason = body
                    .error_description
                    .or(body.error)
                    .unwrap_or_else(|| "response did not contain an access token".to_string());
                warn!(reason = %reason, "Token exchange returned no access token");
                Err(IdentityError::Upstream(reason))
            }
        }
    }

    /// Fetch and normalize the profile of the token's owner.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<Profile> {
        let url = format!("{}/user", self.config.api_url);
        debug!(url = %url, "Fetching provider profile");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Profile fetch rejected");
            return Err(IdentityError::Upstream(format!(
                "profile endpoint returned {}",
                status
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            IdentityError::Upstream(format!("Failed to parse profile response: {}", e))
        })?;

        Profile::from_json(&body)
    }
}

#[async_trait]
impl IdentityProvider for GitHubClient {
    async fn authenticate(&self, code: &str) -> Result<Profile> {
        let access_token = self.exchange_code(code).await?;
        let profile = self.fetch_profile(&access_token).await?;

        info!(github_id = profile.id, login = %profile.login, "Provider profile verified");
        Ok(profile)
    }
}

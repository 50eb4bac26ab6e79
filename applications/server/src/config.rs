/// Server configuration
use crate::error::{Result, ServerError};
use capsule_identity::GitHubConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_github")]
    pub github: GitHubSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed cross-origin callers. Empty means any origin is mirrored back.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,

    #[serde(default = "default_session_expiration_days")]
    pub session_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubSettings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_github_token_url")]
    pub token_url: String,

    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

impl GitHubSettings {
    pub fn to_client_config(&self) -> GitHubConfig {
        GitHubConfig::new(&self.client_id, &self.client_secret)
            .with_endpoints(&self.token_url, &self.api_url)
    }
}

impl ServerConfig {
    /// Load configuration from an explicit file (or `config.toml`) and environment
    ///
    /// Environment variables use the `CAPSULE_` prefix and `__` between
    /// nesting levels, e.g. `CAPSULE_AUTH__JWT_SECRET`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::build(path, None)
    }

    /// `env` replaces the process environment when given
    fn build(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CAPSULE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set CAPSULE_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.auth.session_expiration_days == 0 {
            return Err(ServerError::Config(
                "Session expiration must be at least one day".to_string(),
            ));
        }

        if self.github.client_id.is_empty() || self.github.client_secret.is_empty() {
            return Err(ServerError::Config(
                "GitHub client id and secret are required \
                 (set CAPSULE_GITHUB__CLIENT_ID and CAPSULE_GITHUB__CLIENT_SECRET)"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        cors_origins: Vec::new(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/capsule.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        session_expiration_days: default_session_expiration_days(),
    }
}

fn default_session_expiration_days() -> u64 {
    30
}

fn default_github() -> GitHubSettings {
    GitHubSettings {
        client_id: String::new(),
        client_secret: String::new(),
        token_url: default_github_token_url(),
        api_url: default_github_api_url(),
    }
}

fn default_github_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            github: default_github(),
        }
    }
}

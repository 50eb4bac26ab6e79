//! Types for the GitHub identity exchange.

use crate::error::{IdentityError, ProfileIssue};
use capsule_core::types::NewUser;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const DEFAULT_API_URL: &str = "https://api.github.com";

/// OAuth application credentials and provider endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Endpoint that trades a code for an access token
    pub token_url: String,
    /// Base URL of the REST API (`/user` is appended)
    pub api_url: String,
}

impl GitHubConfig {
    /// Credentials against the public github.com endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point both endpoints at another host (a GitHub Enterprise instance or a mock).
    pub fn with_endpoints(
        mut self,
        token_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        self.token_url = token_url.into();
        self.api_url = api_url.into();
        self
    }
}

/// Body of the token endpoint response.
///
/// GitHub answers a bad code with `200 OK` and an `error` field, so a
/// missing `access_token` has to be checked explicitly.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Normalized provider profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
}

impl Profile {
    /// Validate a raw `/user` payload against the strict profile shape.
    ///
    /// Every failing field is reported, not just the first one.
    pub fn from_json(value: &Value) -> Result<Self, IdentityError> {
        let mut issues = Vec::new();

        let Some(object) = value.as_object() else {
            return Err(IdentityError::InvalidProfile(vec![ProfileIssue {
                field: "profile",
                message: "Expected object".to_string(),
            }]));
        };

        let id = match object.get("id") {
            Some(v) => v.as_i64().or_else(|| {
                issues.push(ProfileIssue {
                    field: "id",
                    message: format!("Expected integer, received {}", kind_of(v)),
                });
                None
            }),
            None => {
                issues.push(required("id"));
                None
            }
        };

        let login = string_field(object.get("login"), "login", &mut issues);
        let name = string_field(object.get("name"), "name", &mut issues);
        let avatar_url = string_field(object.get("avatar_url"), "avatar_url", &mut issues)
            .and_then(|raw| match url::Url::parse(&raw) {
                Ok(_) => Some(raw),
                Err(_) => {
                    issues.push(ProfileIssue {
                        field: "avatar_url",
                        message: "Invalid url".to_string(),
                    });
                    None
                }
            });

        match (id, login, name, avatar_url) {
            (Some(id), Some(login), Some(name), Some(avatar_url)) if issues.is_empty() => {
                Ok(Self {
                    id,
                    login,
                    name,
                    avatar_url,
                })
            }
            _ => Err(IdentityError::InvalidProfile(issues)),
        }
    }
}

impl From<Profile> for NewUser {
    fn from(profile: Profile) -> Self {
        Self {
            github_id: profile.id,
            login: profile.login,
            name: profile.name,
            avatar_url: profile.avatar_url,
        }
    }
}

fn string_field(
    value: Option<&Value>,
    field: &'static str,
    issues: &mut Vec<ProfileIssue>,
) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(ProfileIssue {
                field,
                message: format!("Expected string, received {}", kind_of(other)),
            });
            None
        }
        None => {
            issues.push(required(field));
            None
        }
    }
}

fn required(field: &'static str) -> ProfileIssue {
    ProfileIssue {
        field,
        message: "Required".to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

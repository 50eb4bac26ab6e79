/// Session tokens - signing and verification
use crate::error::{Result, ServerError};
use capsule_core::types::{User, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issues and verifies signed session tokens
///
/// The signing key is fixed for the lifetime of the process. Changing it
/// invalidates every session issued before.
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String, // Subject (user ID)
    pub name: String,
    pub avatar_url: String,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

impl SessionService {
    pub fn new(secret: &str, expiration_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration: Duration::days(expiration_days as i64),
        }
    }

    /// Sign a session for `user`
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.as_str().to_string(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiration).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to sign session: {}", e)))
    }

    /// Verify signature and expiry and return the claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Verify a token and return its subject
    pub fn verify_subject(&self, token: &str) -> Result<UserId> {
        self.verify(token).map(|claims| UserId::new(claims.sub))
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("expiration_days", &self.expiration.num_days())
            .finish_non_exhaustive()
    }
}

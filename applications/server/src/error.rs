/// Server error types
use crate::validation::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use capsule_core::CapsuleError;
use capsule_identity::IdentityError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Identity provider error: {0}")]
    UpstreamAuth(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(CapsuleError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl From<ValidationErrors> for ServerError {
    fn from(errors: ValidationErrors) -> Self {
        ServerError::Validation(errors)
    }
}

impl From<CapsuleError> for ServerError {
    fn from(err: CapsuleError) -> Self {
        match err {
            CapsuleError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{} not found: {}", entity, id))
            }
            CapsuleError::InvalidInput(msg) | CapsuleError::InvalidReference(msg) => {
                ServerError::Validation(ValidationErrors::single("", msg))
            }
            other => ServerError::Database(other),
        }
    }
}

impl From<capsule_storage::StorageError> for ServerError {
    fn from(err: capsule_storage::StorageError) -> Self {
        // Convert StorageError -> CapsuleError -> ServerError
        CapsuleError::from(err).into()
    }
}

impl From<IdentityError> for ServerError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidProfile(issues) => {
                let mut errors = ValidationErrors::new();
                for issue in issues {
                    errors.push(format!("profile.{}", issue.field), issue.message);
                }
                ServerError::Validation(errors)
            }
            other => ServerError::UpstreamAuth(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Validation(errors) => {
                tracing::debug!("Validation failed: {}", errors);
                let body = Json(json!({
                    "error": "Validation failed",
                    "issues": errors.issues(),
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::UpstreamAuth(ref msg) => {
                tracing::warn!("Identity provider error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Identity provider rejected the request".to_string(),
                )
            }
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::debug!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capsule_identity::ProfileIssue;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ServerError::Validation(ValidationErrors::single("id", "Invalid uuid")),
                StatusCode::BAD_REQUEST,
            ),
            (ServerError::Auth("x".into()), StatusCode::UNAUTHORIZED),
            (ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServerError::UpstreamAuth("x".into()), StatusCode::BAD_GATEWAY),
            (
                ServerError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_token_verification_failure_is_unauthorized() {
        let err = ServerError::from(jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::ExpiredSignature,
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_core_not_found_maps_to_404() {
        let err: ServerError = CapsuleError::not_found("Memory", "abc").into();
        assert!(matches!(err, ServerError::NotFound(_)));
    }

    #[test]
    fn test_invalid_reference_is_client_error() {
        let err: ServerError = CapsuleError::InvalidReference("FOREIGN KEY".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_profile_maps_to_validation() {
        let err: ServerError = IdentityError::InvalidProfile(vec![ProfileIssue {
            field: "name",
            message: "Required".to_string(),
        }])
        .into();

        match err {
            ServerError::Validation(errors) => {
                assert_eq!(errors.issues()[0].path, "profile.name");
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_upstream_failure_maps_to_bad_gateway() {
        let err: ServerError = IdentityError::Upstream("bad_verification_code".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}

//! Tests for the GitHub identity exchange.
//!
//! These tests use a mock server standing in for both the OAuth token
//! endpoint and the REST API.

use capsule_identity::{GitHubClient, GitHubConfig, IdentityError, IdentityProvider};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let config = GitHubConfig::new("test-client-id", "test-client-secret").with_endpoints(
        format!("{}/login/oauth/access_token", server.uri()),
        server.uri(),
    );
    GitHubClient::new(config).unwrap()
}

fn octo_profile() -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "login": "octo",
        "name": "Octo Cat",
        "avatar_url": "https://x/a.png"
    })
}

async fn mount_token(server: &MockServer, code: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(query_param("client_id", "test-client-id"))
        .and(query_param("client_secret", "test-client-secret"))
        .and(query_param("code", code))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "scope": ""
        })))
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_default_endpoints_accepted() {
        let client = GitHubClient::new(GitHubConfig::new("id", "secret"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let config = GitHubConfig::new("id", "secret").with_endpoints("ftp://x", "https://api");
        match GitHubClient::new(config) {
            Err(IdentityError::Config(msg)) => assert!(msg.contains("ftp://x")),
            other => panic!("Expected Config error, got {:?}", other.err()),
        }
    }
}

// =============================================================================
// Full Flow Tests
// =============================================================================

mod authenticate {
    use super::*;

    #[tokio::test]
    async fn test_code_to_profile() {
        let server = MockServer::start().await;
        mount_token(&server, "abc", "T").await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", "Bearer T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(octo_profile()))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server).authenticate("abc").await.unwrap();

        assert_eq!(profile.id, 42);
        assert_eq!(profile.login, "octo");
        assert_eq!(profile.name, "Octo Cat");
        assert_eq!(profile.avatar_url, "https://x/a.png");
    }

    #[tokio::test]
    async fn test_bad_verification_code() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "bad_verification_code",
                "error_description": "The code passed is incorrect or expired."
            })))
            .mount(&server)
            .await;

        // Profile endpoint must never be reached
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(octo_profile()))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).authenticate("stale").await.unwrap_err();

        match err {
            IdentityError::Upstream(msg) => assert!(msg.contains("incorrect or expired")),
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_token_endpoint_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).authenticate("abc").await.unwrap_err();
        assert!(matches!(err, IdentityError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_profile_endpoint_unauthorized() {
        let server = MockServer::start().await;
        mount_token(&server, "abc", "T").await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).authenticate("abc").await.unwrap_err();
        assert!(matches!(err, IdentityError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_profile_without_name_is_invalid() {
        let server = MockServer::start().await;
        mount_token(&server, "abc", "T").await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "login": "octo",
                "name": null,
                "avatar_url": "https://x/a.png"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).authenticate("abc").await.unwrap_err();

        match err {
            IdentityError::InvalidProfile(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "name");
            }
            other => panic!("Expected InvalidProfile, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.authenticate("abc").await.is_err());
        // `expect(1)` is verified when the server drops
    }
}

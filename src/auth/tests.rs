//! Tests for the auth module

use super::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build(auth: &Authenticator) -> reqwest::Request {
    let client = reqwest::Client::new();
    auth.apply(client.get("https://example.com/api"))
        .build()
        .unwrap()
}

#[test]
fn test_no_auth() {
    let req = build(&Authenticator::new(AuthConfig::None));
    assert!(req.headers().get("Authorization").is_none());
}

#[test]
fn test_token_auth() {
    let req = build(&Authenticator::new(AuthConfig::Token {
        token: "abc123".to_string(),
    }));
    assert_eq!(req.headers().get("Authorization").unwrap(), "token abc123");
}

#[test]
fn test_bearer_auth() {
    let req = build(&Authenticator::new(AuthConfig::Bearer {
        token: "my-token".to_string(),
    }));
    assert_eq!(req.headers().get("Authorization").unwrap(), "Bearer my-token");
}

#[test]
fn test_basic_auth() {
    let req = build(&Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    }));
    // base64("user:pass")
    assert_eq!(
        req.headers().get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}

#[tokio::test]
async fn test_token_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/protected"))
        .and(header("Authorization", "token t0k"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Token {
        token: "t0k".to_string(),
    });
    let client = reqwest::Client::new();
    let resp = auth
        .apply(client.get(format!("{}/api/protected", mock_server.uri())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

//! Authenticator implementation
//!
//! Handles applying authentication to requests.

use super::types::AuthConfig;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The configured credentials
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Token { token } => req.header(AUTHORIZATION, format!("token {token}")),
            AuthConfig::Bearer { token } => req.bearer_auth(token),
            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),
        }
    }
}

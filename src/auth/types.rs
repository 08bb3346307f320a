//! Auth configuration types

use std::fmt;

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Access token sent as `Authorization: token <token>`
    Token {
        /// The access token
        token: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

impl AuthConfig {
    /// Check if any credentials are configured
    pub fn is_none(&self) -> bool {
        matches!(self, AuthConfig::None)
    }
}

// Credentials stay out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::None => f.write_str("None"),
            AuthConfig::Token { .. } => f.write_str("Token { token: \"***\" }"),
            AuthConfig::Bearer { .. } => f.write_str("Bearer { token: \"***\" }"),
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(config.is_none());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig::Basic {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));

        let debug = format!(
            "{:?}",
            AuthConfig::Token {
                token: "secret".to_string()
            }
        );
        assert!(!debug.contains("secret"));
    }
}

//! Client configuration
//!
//! Settings are layered: built-in defaults, then a YAML file, then the
//! `SRC_ENDPOINT` and `SRC_TOKEN` environment variables.

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable overriding the API endpoint
pub const ENDPOINT_ENV: &str = "SRC_ENDPOINT";

/// Environment variable holding an access token
pub const TOKEN_ENV: &str = "SRC_TOKEN";

/// Configuration for [`Client`](crate::client::Client)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API endpoint that route paths are appended to
    pub base_url: String,

    /// Access token, sent as `Authorization: token <token>`
    pub token: Option<String>,

    /// HTTP basic credentials, used when no token is set
    pub username: Option<String>,
    pub password: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub max_retries: u32,

    /// Client-side rate limit; `None` disables it
    pub requests_per_second: Option<u32>,

    /// Overrides the default `sourcegraph-client/<version>` user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            username: None,
            password: None,
            timeout_secs: 30,
            max_retries: 3,
            requests_per_second: Some(10),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Load from an optional YAML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `SRC_ENDPOINT` and `SRC_TOKEN` as returned by `lookup`.
    /// Empty values are ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(endpoint) = get(ENDPOINT_ENV) {
            self.base_url = endpoint;
        }
        if let Some(token) = get(TOKEN_ENV) {
            self.token = Some(token);
        }
        self
    }

    /// Check the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme {:?}", url.scheme()),
            ));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(Error::invalid_config(
                "username",
                "username and password must be set together",
            ));
        }
        Ok(())
    }

    /// HTTP transport settings
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        self.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries);
        builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(builder.build())
    }

    /// Credentials; a token wins over basic auth
    pub fn auth_config(&self) -> AuthConfig {
        match (&self.token, &self.username, &self.password) {
            (Some(token), _, _) => AuthConfig::Token {
                token: token.clone(),
            },
            (None, Some(username), Some(password)) => AuthConfig::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => AuthConfig::None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("requests_per_second", &self.requests_per_second)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://sourcegraph.com/api/");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.requests_per_second, Some(10));
        assert!(config.auth_config().is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
base_url: "https://sourcegraph.example.com/api/"
token: "abc"
max_retries: 1
requests_per_second: null
"#;

        let config = ClientConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "https://sourcegraph.example.com/api/");
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.requests_per_second, None);
        assert_eq!(
            config.auth_config(),
            AuthConfig::Token {
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "username: alice\npassword: hunter2\ntimeout_secs: 5").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert!(matches!(config.auth_config(), AuthConfig::Basic { ref username, .. } if username == "alice"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_file(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ClientConfig::from_yaml("base_url: https://a.example.com/api/\ntoken: file")
            .unwrap()
            .with_env(env(&[
                (ENDPOINT_ENV, "https://b.example.com/api/"),
                (TOKEN_ENV, "env"),
            ]));

        assert_eq!(config.base_url, "https://b.example.com/api/");
        assert_eq!(config.token.as_deref(), Some("env"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = ClientConfig::default().with_env(env(&[(TOKEN_ENV, "")]));
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig {
            base_url: "ftp://example.com/".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.http_config(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_http_config() {
        let config = ClientConfig {
            user_agent: Some("custom/1".to_string()),
            requests_per_second: None,
            ..Default::default()
        };
        let http = config.http_config().unwrap();
        assert_eq!(http.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert_eq!(http.user_agent, "custom/1");
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ClientConfig {
            token: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }
}

//! Error types for the Sourcegraph client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Sourcegraph client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Routing Errors
    // ============================================================================
    #[error("No route matched {method} {path}")]
    RouteMismatch { method: String, path: String },

    #[error("Invalid route pattern '{pattern}': {message}")]
    RoutePattern { pattern: String, message: String },

    #[error("Missing route variable '{variable}' for route {route}")]
    MissingRouteVar { route: String, variable: String },

    #[error("Route variable '{variable}' = {value:?} doesn't match, expected {expected:?}")]
    InvalidRouteVar {
        variable: String,
        value: String,
        expected: String,
    },

    #[error("Unknown route: {name}")]
    UnknownRoute { name: String },

    #[error("Invalid query string: {message}")]
    InvalidQuery { message: String },

    #[error("Invalid repository reference {spec:?}")]
    InvalidRepoSpec { spec: String },

    #[error("Invalid person spec {spec:?}: {message}")]
    InvalidPersonSpec { spec: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("user does not exist")]
    PersonNotExist,

    #[error("login {old_login:?} was renamed to {new_login:?}; use the new name")]
    PersonRenamed { old_login: String, new_login: String },

    // ============================================================================
    // Mock Errors
    // ============================================================================
    #[error("Mock method not implemented: {method}")]
    NotImplemented { method: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a route mismatch error
    pub fn route_mismatch(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::RouteMismatch {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Create a route pattern error
    pub fn route_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RoutePattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a missing route variable error
    pub fn missing_route_var(route: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::MissingRouteVar {
            route: route.into(),
            variable: variable.into(),
        }
    }

    /// Create an invalid query string error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create an invalid person spec error
    pub fn invalid_person_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPersonSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a not-implemented error for an unset mock method
    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if this error means no route accepted the request
    pub fn is_route_mismatch(&self) -> bool {
        matches!(self, Error::RouteMismatch { .. })
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the Sourcegraph client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

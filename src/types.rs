//! Common types used throughout the Sourcegraph client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Upper-case method name as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            other => Err(Error::Other(format!("unsupported HTTP method: {other}"))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// List Options
// ============================================================================

/// Paging options shared by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListOptions {
    /// Number of results per page
    #[serde(
        default,
        deserialize_with = "query_value::option_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub per_page: Option<u32>,
    /// 1-based page number
    #[serde(
        default,
        deserialize_with = "query_value::option_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u32>,
}

impl ListOptions {
    /// Create paging options for a given page size and page
    pub fn new(per_page: u32, page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            page: Some(page),
        }
    }
}

/// Encode an options struct as URL query parameters.
///
/// Nested objects (flattened option groups) are merged into the top level.
/// Null values and empty strings are omitted.
pub fn query_params<T: Serialize>(opts: &T) -> Result<StringMap> {
    let mut params = StringMap::new();
    collect_query_params(serde_json::to_value(opts)?, &mut params)?;
    Ok(params)
}

fn collect_query_params(value: JsonValue, params: &mut StringMap) -> Result<()> {
    let JsonValue::Object(map) = value else {
        return Err(Error::Other(
            "query options must serialize to an object".to_string(),
        ));
    };

    for (key, value) in map {
        match value {
            JsonValue::Null => {}
            JsonValue::String(s) => {
                if let Some(s) = s.none_if_empty() {
                    params.insert(key, s);
                }
            }
            JsonValue::Bool(b) => {
                params.insert(key, b.to_string());
            }
            JsonValue::Number(n) => {
                params.insert(key, n.to_string());
            }
            nested @ JsonValue::Object(_) => collect_query_params(nested, params)?,
            JsonValue::Array(items) => {
                let joined: Vec<String> = items
                    .iter()
                    .map(|v| match v {
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                params.insert(key, joined.join(","));
            }
        }
    }
    Ok(())
}

/// Deserializers for option fields that arrive either typed (JSON) or as
/// query string text.
///
/// Flattened option groups lose the query string's field types, so numbers
/// and booleans reach them as strings.
pub mod query_value {
    use serde::{Deserialize, Deserializer};
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOr<T> {
        Value(T),
        Text(String),
    }

    impl<T> TextOr<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        fn into_value<E: serde::de::Error>(self) -> Result<T, E> {
            match self {
                TextOr::Value(value) => Ok(value),
                TextOr::Text(text) => text
                    .parse()
                    .map_err(|e| E::custom(format!("invalid value {text:?}: {e}"))),
            }
        }
    }

    pub fn bool_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        TextOr::<bool>::deserialize(deserializer)?.into_value()
    }

    pub fn option_or_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Option::<TextOr<T>>::deserialize(deserializer)?
            .map(TextOr::into_value)
            .transpose()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

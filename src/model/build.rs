//! Builds of repository revisions

use crate::error::{Error, Result};
use crate::router::RouteVars;
use crate::types::{query_value, ListOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Route variable holding a build ID
pub const BID_VAR: &str = "BID";

/// Identifies a build by its numeric ID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildSpec {
    #[serde(rename = "BID")]
    pub bid: i64,
}

impl BuildSpec {
    pub fn new(bid: i64) -> Self {
        Self { bid }
    }

    pub fn route_vars(&self) -> RouteVars {
        RouteVars::from([(BID_VAR.to_string(), self.bid.to_string())])
    }

    pub fn from_route_vars(vars: &RouteVars) -> Result<Self> {
        let raw = vars
            .get(BID_VAR)
            .ok_or_else(|| Error::missing_route_var("build", BID_VAR))?;
        let bid = raw.parse().map_err(|_| Error::InvalidRouteVar {
            variable: BID_VAR.to_string(),
            value: raw.clone(),
            expected: "integer".to_string(),
        })?;
        Ok(Self { bid })
    }
}

/// A build of a repository at a commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Build {
    #[serde(rename = "BID")]
    pub bid: i64,
    /// Repository ID
    pub repo: i32,
    #[serde(rename = "CommitID", default)]
    pub commit_id: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub failure: bool,
    #[serde(default)]
    pub killed: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub purged: bool,
    #[serde(flatten)]
    pub config: BuildConfig,
}

impl Build {
    pub fn spec(&self) -> BuildSpec {
        BuildSpec::new(self.bid)
    }

    /// Whether the build has finished, successfully or not
    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

/// Parameters controlling what a build does
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildConfig {
    /// Import the build's output into the database
    #[serde(default)]
    pub import: bool,
    /// Enqueue the build for a worker
    #[serde(default)]
    pub queue: bool,
    #[serde(default)]
    pub use_cache: bool,
    #[serde(default)]
    pub priority: i32,
}

/// Request body for creating a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildCreateOptions {
    #[serde(flatten)]
    pub config: BuildConfig,
    /// Create the build even if one already exists for the commit
    #[serde(default)]
    pub force: bool,
}

/// Filters for listing builds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildListOptions {
    #[serde(
        default,
        deserialize_with = "query_value::bool_or_text",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub queued: bool,
    #[serde(
        default,
        deserialize_with = "query_value::bool_or_text",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub active: bool,
    #[serde(
        default,
        deserialize_with = "query_value::bool_or_text",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub ended: bool,
    #[serde(
        default,
        deserialize_with = "query_value::bool_or_text",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub succeeded: bool,
    #[serde(
        default,
        deserialize_with = "query_value::bool_or_text",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for looking up build info of a repository revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildsGetRepoBuildInfoOptions {
    /// Only consider builds of the exact commit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exact: bool,
}

/// Build status of a repository revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepoBuildInfo {
    /// Build of the exact commit, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<Build>,
    /// Most recent successful build at or before the commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_successful: Option<Build>,
    /// Commits between `last_successful` and the requested revision
    #[serde(default)]
    pub commits_behind: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_successful_commit: Option<String>,
}

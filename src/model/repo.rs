//! Repository references and commit statuses

use crate::error::{Error, Result};
use crate::router::{fix_repo_vars, PathPattern, RouteVars, REPO_PATH_PATTERN, REPO_SPEC_VAR, REV_VAR};
use crate::types::OptionStringExt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Compiled repository path segment, `<URI>` or `<URI>@<Rev>`
static REPO_SEGMENT: LazyLock<PathPattern> =
    LazyLock::new(|| PathPattern::parse(REPO_PATH_PATTERN).unwrap());

// ============================================================================
// Repository Specs
// ============================================================================

/// Identifies a repository by URI, e.g. `github.com/foo/bar`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSpec {
    #[serde(rename = "URI")]
    pub uri: String,
}

impl RepoSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Route variables for routes taking a bare repository
    pub fn route_vars(&self) -> RouteVars {
        RouteVars::from([(REPO_SPEC_VAR.to_string(), self.uri.clone())])
    }

    /// Read the repository from matched route variables
    pub fn from_route_vars(vars: &RouteVars) -> Result<Self> {
        vars.get(REPO_SPEC_VAR)
            .map(|uri| Self::new(uri.clone()))
            .ok_or_else(|| Error::missing_route_var("repo", REPO_SPEC_VAR))
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// A repository at an optional revision.
///
/// `rev == None` means the repository's default revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRevSpec {
    #[serde(flatten)]
    pub repo: RepoSpec,
    #[serde(rename = "Rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

impl RepoRevSpec {
    /// Reference the default revision of a repository
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            repo: RepoSpec::new(uri),
            rev: None,
        }
    }

    /// Pin a revision. An empty revision means the default one.
    #[must_use]
    pub fn with_rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = rev.into().none_if_empty();
        self
    }

    /// Normalized route variables: `RepoSpec`, plus `Rev` when pinned.
    ///
    /// Pass through [`prepare_repo_route_vars`](crate::router::prepare_repo_route_vars)
    /// before building a route.
    pub fn route_vars(&self) -> RouteVars {
        let mut vars = self.repo.route_vars();
        if let Some(rev) = &self.rev {
            vars.insert(REV_VAR.to_string(), rev.clone());
        }
        vars
    }

    /// Read the spec from normalized route variables (after
    /// [`fix_repo_vars`]).
    pub fn from_route_vars(vars: &RouteVars) -> Result<Self> {
        Ok(Self {
            repo: RepoSpec::from_route_vars(vars)?,
            rev: vars.get(REV_VAR).cloned().none_if_empty(),
        })
    }

    /// Parse a path segment such as `github.com/foo/bar@v1.2.3`
    pub fn parse(segment: &str) -> Result<Self> {
        let vars = REPO_SEGMENT
            .captures(segment)
            .ok_or_else(|| Error::InvalidRepoSpec {
                spec: segment.to_string(),
            })?;
        Self::from_route_vars(&fix_repo_vars(vars))
    }
}

impl fmt::Display for RepoRevSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rev {
            Some(rev) => write!(f, "{}@{}", self.repo.uri, rev),
            None => f.write_str(&self.repo.uri),
        }
    }
}

impl FromStr for RepoRevSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<RepoSpec> for RepoRevSpec {
    fn from(repo: RepoSpec) -> Self {
        Self { repo, rev: None }
    }
}

// ============================================================================
// Commit Statuses
// ============================================================================

/// A single commit status, as reported by CI or other integrations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    /// `pending`, `success`, `error` or `failure`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepoStatus {
    /// Status with only a state set
    pub fn with_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Default::default()
        }
    }
}

/// Combined view of every status reported for a revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<RepoStatus>,
}

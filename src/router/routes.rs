//! Route catalog and the router that matches and builds API paths

use super::pattern::{PathPattern, RouteVars};
use super::repo::{repo_path_pattern, repo_spec_path_pattern, REPO_SPEC_VAR, REV_VAR};
use crate::error::{Error, Result};
use crate::types::Method;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ============================================================================
// Route Names
// ============================================================================

/// Every named route of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum RouteName {
    Builds,
    Build,
    RepoBuilds,
    RepoBuildsCreate,
    RepoBuildInfo,
    RepoCombinedStatus,
    RepoStatusCreate,
    People,
    Person,
    PersonAuthors,
    PersonClients,
    PersonRefreshProfile,
    PersonComputeStats,
    PersonFromGitHub,
}

impl RouteName {
    /// All routes, in catalog order
    pub const ALL: [RouteName; 14] = [
        RouteName::Builds,
        RouteName::Build,
        RouteName::RepoBuilds,
        RouteName::RepoBuildsCreate,
        RouteName::RepoBuildInfo,
        RouteName::RepoCombinedStatus,
        RouteName::RepoStatusCreate,
        RouteName::People,
        RouteName::Person,
        RouteName::PersonAuthors,
        RouteName::PersonClients,
        RouteName::PersonRefreshProfile,
        RouteName::PersonComputeStats,
        RouteName::PersonFromGitHub,
    ];

    /// Stable route name
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Builds => "builds",
            RouteName::Build => "build",
            RouteName::RepoBuilds => "repo.builds",
            RouteName::RepoBuildsCreate => "repo.builds.create",
            RouteName::RepoBuildInfo => "repo.build-info",
            RouteName::RepoCombinedStatus => "repo.combined-status",
            RouteName::RepoStatusCreate => "repo.status.create",
            RouteName::People => "people",
            RouteName::Person => "person",
            RouteName::PersonAuthors => "person.authors",
            RouteName::PersonClients => "person.clients",
            RouteName::PersonRefreshProfile => "person.refresh-profile",
            RouteName::PersonComputeStats => "person.compute-stats",
            RouteName::PersonFromGitHub => "person.from-github",
        }
    }

    /// Method and path template of this route
    fn definition(self) -> (Method, &'static str) {
        match self {
            RouteName::Builds => (Method::GET, "/builds"),
            RouteName::Build => (Method::GET, "/builds/{BID:[0-9]+}"),
            RouteName::RepoBuilds => (
                Method::GET,
                concat!("/repos/", repo_spec_path_pattern!(), "/.builds"),
            ),
            RouteName::RepoBuildsCreate => (
                Method::POST,
                concat!("/repos/", repo_spec_path_pattern!(), "/.builds"),
            ),
            RouteName::RepoBuildInfo => (
                Method::GET,
                concat!("/repos/", repo_path_pattern!(), "/.build-info"),
            ),
            RouteName::RepoCombinedStatus => (
                Method::GET,
                concat!("/repos/", repo_path_pattern!(), "/.status"),
            ),
            RouteName::RepoStatusCreate => (
                Method::POST,
                concat!("/repos/", repo_path_pattern!(), "/.status"),
            ),
            RouteName::People => (Method::GET, "/people"),
            RouteName::Person => (Method::GET, "/people/{PersonSpec:[^/.][^/]*}"),
            RouteName::PersonAuthors => (Method::GET, "/people/{PersonSpec:[^/.][^/]*}/.authors"),
            RouteName::PersonClients => (Method::GET, "/people/{PersonSpec:[^/.][^/]*}/.clients"),
            RouteName::PersonRefreshProfile => (
                Method::PUT,
                "/people/{PersonSpec:[^/.][^/]*}/.refresh-profile",
            ),
            RouteName::PersonComputeStats => (
                Method::PUT,
                "/people/{PersonSpec:[^/.][^/]*}/.compute-stats",
            ),
            RouteName::PersonFromGitHub => (
                Method::GET,
                "/ext/github/users/{GitHubUserSpec:[^/.][^/]*}",
            ),
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RouteName> for &'static str {
    fn from(name: RouteName) -> Self {
        name.as_str()
    }
}

impl FromStr for RouteName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RouteName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::UnknownRoute { name: s.to_string() })
    }
}

// ============================================================================
// Routes
// ============================================================================

/// A named route: method plus compiled path pattern
#[derive(Debug, Clone)]
pub struct Route {
    name: RouteName,
    method: Method,
    pattern: PathPattern,
}

impl Route {
    /// Compile a route
    pub fn new(name: RouteName, method: Method, template: &str) -> Result<Self> {
        Ok(Self {
            name,
            method,
            pattern: PathPattern::parse(template)?,
        })
    }

    pub fn name(&self) -> RouteName {
        self.name
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Whether the route embeds a repository reference with optional revision
    pub fn has_repo_rev(&self) -> bool {
        self.pattern.has_variable(REPO_SPEC_VAR) && self.pattern.has_variable(REV_VAR)
    }
}

/// Result of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Route that accepted the request
    pub route: RouteName,
    /// Raw variables as captured from the path
    pub vars: RouteVars,
}

// ============================================================================
// Router
// ============================================================================

/// Matches request paths to routes and builds paths from route variables.
///
/// Construct once and share by reference (or `Arc`). The router is
/// immutable after construction.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create a router holding the full API route catalog
    pub fn new() -> Self {
        let routes = RouteName::ALL
            .into_iter()
            .map(|name| {
                let (method, template) = name.definition();
                Route::new(name, method, template)
            })
            .collect::<Result<Vec<_>>>()
            .expect("built-in route catalog compiles");
        Self { routes }
    }

    /// Create a router from an explicit list of routes
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Iterate routes in match order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Look up a route by name
    pub fn route(&self, name: RouteName) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Build the path of a route from raw route variables.
    ///
    /// Repository routes expect variables already passed through
    /// [`prepare_repo_route_vars`](super::prepare_repo_route_vars).
    pub fn url(&self, name: RouteName, vars: &RouteVars) -> Result<String> {
        let route = self.route(name).ok_or_else(|| Error::UnknownRoute {
            name: name.to_string(),
        })?;
        let path = route.pattern.build(vars)?;
        debug!(route = %name, %path, "built route path");
        Ok(path)
    }

    /// Find the first route whose method and path pattern accept the request.
    ///
    /// Any query string is ignored. The path is matched as received, without
    /// percent-decoding.
    pub fn match_path(&self, method: Method, path: &str) -> Result<RouteMatch> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);

        for route in &self.routes {
            if route.method != method {
                continue;
            }
            if let Some(vars) = route.pattern.captures(path) {
                debug!(route = %route.name, %method, path, "matched route");
                return Ok(RouteMatch {
                    route: route.name,
                    vars,
                });
            }
        }

        debug!(%method, path, "no route matched");
        Err(Error::route_mismatch(method.as_str(), path))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

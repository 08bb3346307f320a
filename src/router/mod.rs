//! URL routing for the API
//!
//! Route templates, the route catalog, and the repository path segment
//! encoding shared by the client and the mock server.
//!
//! # Overview
//!
//! The [`Router`] is an explicit object: build it once with [`Router::new`]
//! and hand it to whatever needs to match or build paths. It never applies
//! the repository transforms on its own. Callers building a repository
//! route run [`prepare_repo_route_vars`] first, and callers that matched one
//! run [`fix_repo_vars`] afterwards.

mod pattern;
pub(crate) mod repo;
mod routes;

pub use pattern::{PathPattern, RouteVars};
pub use repo::{
    fix_repo_vars, prepare_repo_route_vars, REPO_PATH_PATTERN, REPO_SPEC_PATH_PATTERN,
    REPO_SPEC_VAR, REV_VAR,
};
pub use routes::{Route, RouteMatch, RouteName, Router};

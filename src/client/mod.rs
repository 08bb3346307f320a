//! Typed API client
//!
//! [`Client`] builds request paths through the [`Router`] and sends them with
//! the [`HttpClient`]. Each API area is a service trait so callers can swap
//! the HTTP implementation for the ones in [`crate::mock`].
//!
//! # Example
//!
//! ```no_run
//! use sourcegraph_client::client::{Client, ReposService};
//! use sourcegraph_client::model::RepoRevSpec;
//!
//! # async fn example() -> sourcegraph_client::Result<()> {
//! let client = Client::new()?;
//! let status = client
//!     .repos()
//!     .get_combined_status(&RepoRevSpec::new("github.com/foo/bar").with_rev("v1.2.3"))
//!     .await?;
//! println!("{:?}", status.state);
//! # Ok(())
//! # }
//! ```

mod builds;
mod people;
mod repos;
mod services;

pub use builds::BuildsClient;
pub use people::PeopleClient;
pub use repos::ReposClient;
pub use services::{BuildsService, PeopleService, ReposService};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::model::RepoRevSpec;
use crate::router::{prepare_repo_route_vars, RouteName, RouteVars, Router};
use crate::types::{query_params, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Client for the Sourcegraph REST API
#[derive(Debug, Clone)]
pub struct Client {
    http: Arc<HttpClient>,
    router: Arc<Router>,
}

impl Client {
    /// Client for the public API with default settings
    pub fn new() -> Result<Self> {
        Ok(Self::with_http(HttpClient::new()?))
    }

    /// Client built from a loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::with_auth(config.http_config()?, config.auth_config())?;
        Ok(Self::with_http(http))
    }

    /// Client sending through the given HTTP client
    pub fn with_http(http: HttpClient) -> Self {
        Self::with_router(http, Arc::new(Router::new()))
    }

    /// Client sharing an existing router
    pub fn with_router(http: HttpClient, router: Arc<Router>) -> Self {
        Self {
            http: Arc::new(http),
            router,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Repository statuses
    pub fn repos(&self) -> ReposClient {
        ReposClient::new(self.clone())
    }

    /// Builds
    pub fn builds(&self) -> BuildsClient {
        BuildsClient::new(self.clone())
    }

    /// People
    pub fn people(&self) -> PeopleClient {
        PeopleClient::new(self.clone())
    }

    /// Path of a route from already complete variables
    pub(crate) fn url(&self, name: RouteName, vars: &RouteVars) -> Result<String> {
        self.router.url(name, vars)
    }

    /// Path of a `{repo-rev}` route for a repository revision
    pub(crate) fn repo_rev_url(&self, name: RouteName, spec: &RepoRevSpec) -> Result<String> {
        self.router
            .url(name, &prepare_repo_route_vars(spec.route_vars()))
    }

    /// Send a request and decode the JSON response
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        debug!(%method, path, "Calling API");
        self.http.request_json(method, path, config).await
    }

    /// Send a request whose response body is ignored
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<()> {
        debug!(%method, path, "Calling API");
        self.http.request(method, path, config).await?;
        Ok(())
    }
}

/// Request config carrying options as query parameters; `None` sends none
pub(crate) fn query_config<T: Serialize>(opts: Option<&T>) -> Result<RequestConfig> {
    match opts {
        Some(opts) => Ok(RequestConfig::new().query_map(query_params(opts)?)),
        None => Ok(RequestConfig::new()),
    }
}

#[cfg(test)]
mod tests;

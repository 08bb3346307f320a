//! Builds over HTTP

use super::services::BuildsService;
use super::{query_config, Client};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::model::{
    Build, BuildCreateOptions, BuildListOptions, BuildSpec, BuildsGetRepoBuildInfoOptions,
    RepoBuildInfo, RepoRevSpec, RepoSpec,
};
use crate::router::{RouteName, RouteVars};
use crate::types::Method;
use async_trait::async_trait;

/// [`BuildsService`] backed by the API
#[derive(Debug, Clone)]
pub struct BuildsClient {
    client: Client,
}

impl BuildsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BuildsService for BuildsClient {
    async fn get(&self, spec: &BuildSpec) -> Result<Build> {
        let path = self.client.url(RouteName::Build, &spec.route_vars())?;
        self.client
            .send_json(Method::GET, &path, RequestConfig::new())
            .await
    }

    async fn list(&self, opts: Option<&BuildListOptions>) -> Result<Vec<Build>> {
        let path = self.client.url(RouteName::Builds, &RouteVars::new())?;
        self.client
            .send_json(Method::GET, &path, query_config(opts)?)
            .await
    }

    async fn list_by_repository(
        &self,
        repo: &RepoSpec,
        opts: Option<&BuildListOptions>,
    ) -> Result<Vec<Build>> {
        let path = self.client.url(RouteName::RepoBuilds, &repo.route_vars())?;
        self.client
            .send_json(Method::GET, &path, query_config(opts)?)
            .await
    }

    async fn create(&self, repo: &RepoSpec, opts: &BuildCreateOptions) -> Result<Build> {
        let path = self
            .client
            .url(RouteName::RepoBuildsCreate, &repo.route_vars())?;
        let body = serde_json::to_value(opts)?;
        self.client
            .send_json(Method::POST, &path, RequestConfig::new().json(body))
            .await
    }

    async fn get_repo_build_info(
        &self,
        spec: &RepoRevSpec,
        opts: Option<&BuildsGetRepoBuildInfoOptions>,
    ) -> Result<RepoBuildInfo> {
        let path = self.client.repo_rev_url(RouteName::RepoBuildInfo, spec)?;
        self.client
            .send_json(Method::GET, &path, query_config(opts)?)
            .await
    }
}

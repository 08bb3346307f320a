//! Repository statuses over HTTP

use super::services::ReposService;
use super::Client;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::model::{CombinedStatus, RepoRevSpec, RepoStatus};
use crate::router::RouteName;
use crate::types::Method;
use async_trait::async_trait;

/// [`ReposService`] backed by the API
#[derive(Debug, Clone)]
pub struct ReposClient {
    client: Client,
}

impl ReposClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReposService for ReposClient {
    async fn get_combined_status(&self, spec: &RepoRevSpec) -> Result<CombinedStatus> {
        let path = self
            .client
            .repo_rev_url(RouteName::RepoCombinedStatus, spec)?;
        self.client
            .send_json(Method::GET, &path, RequestConfig::new())
            .await
    }

    async fn create_status(&self, spec: &RepoRevSpec, status: &RepoStatus) -> Result<RepoStatus> {
        let path = self.client.repo_rev_url(RouteName::RepoStatusCreate, spec)?;
        let body = serde_json::to_value(status)?;
        self.client
            .send_json(Method::POST, &path, RequestConfig::new().json(body))
            .await
    }
}

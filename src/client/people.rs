//! People over HTTP

use super::services::PeopleService;
use super::{query_config, Client};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::model::{
    AugmentedPersonUsageByClient, AugmentedPersonUsageOfAuthor, GitHubUserSpec, Person,
    PersonListOptions, PersonSpec,
};
use crate::router::{RouteName, RouteVars};
use crate::types::{ListOptions, Method};
use async_trait::async_trait;

/// [`PeopleService`] backed by the API
#[derive(Debug, Clone)]
pub struct PeopleClient {
    client: Client,
}

impl PeopleClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get_person(&self, name: RouteName, vars: &RouteVars) -> Result<Person> {
        let path = self.client.url(name, vars)?;
        self.client
            .send_json(Method::GET, &path, RequestConfig::new())
            .await
            .map_err(not_found_as_missing_person)
    }
}

/// A 404 on a person lookup means the user doesn't exist
fn not_found_as_missing_person(err: Error) -> Error {
    match err {
        Error::HttpStatus { status: 404, .. } => Error::PersonNotExist,
        other => other,
    }
}

#[async_trait]
impl PeopleService for PeopleClient {
    async fn get(&self, spec: &PersonSpec) -> Result<Person> {
        self.get_person(RouteName::Person, &spec.route_vars()?)
            .await
    }

    async fn get_or_create_from_github(&self, spec: &GitHubUserSpec) -> Result<Person> {
        self.get_person(RouteName::PersonFromGitHub, &spec.route_vars())
            .await
    }

    async fn refresh_profile(&self, spec: &PersonSpec) -> Result<()> {
        let path = self
            .client
            .url(RouteName::PersonRefreshProfile, &spec.route_vars()?)?;
        self.client
            .send(Method::PUT, &path, RequestConfig::new())
            .await
    }

    async fn compute_stats(&self, spec: &PersonSpec) -> Result<()> {
        let path = self
            .client
            .url(RouteName::PersonComputeStats, &spec.route_vars()?)?;
        self.client
            .send(Method::PUT, &path, RequestConfig::new())
            .await
    }

    async fn list(&self, opts: Option<&PersonListOptions>) -> Result<Vec<Person>> {
        let path = self.client.url(RouteName::People, &RouteVars::new())?;
        self.client
            .send_json(Method::GET, &path, query_config(opts)?)
            .await
    }

    async fn list_authors(
        &self,
        spec: &PersonSpec,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<AugmentedPersonUsageByClient>> {
        let path = self
            .client
            .url(RouteName::PersonAuthors, &spec.route_vars()?)?;
        self.client
            .send_json(Method::GET, &path, query_config(opts)?)
            .await
    }

    async fn list_clients(
        &self,
        spec: &PersonSpec,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<AugmentedPersonUsageOfAuthor>> {
        let path = self
            .client
            .url(RouteName::PersonClients, &spec.route_vars()?)?;
        self.client
            .send_json(Method::GET, &path, query_config(opts)?)
            .await
    }
}

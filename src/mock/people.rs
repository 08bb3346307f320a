//! Mock people service

use super::called_flag;
use crate::client::PeopleService;
use crate::error::{Error, Result};
use crate::model::{
    AugmentedPersonUsageByClient, AugmentedPersonUsageOfAuthor, GitHubUserSpec, Person,
    PersonListOptions, PersonSpec,
};
use crate::types::ListOptions;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type PeopleGetFn = Box<dyn Fn(&PersonSpec) -> Result<Person> + Send + Sync>;
pub type PeopleGetFromGitHubFn = Box<dyn Fn(&GitHubUserSpec) -> Result<Person> + Send + Sync>;
pub type PeopleUpdateFn = Box<dyn Fn(&PersonSpec) -> Result<()> + Send + Sync>;
pub type PeopleListFn = Box<dyn Fn(Option<&PersonListOptions>) -> Result<Vec<Person>> + Send + Sync>;
pub type PeopleListAuthorsFn = Box<
    dyn Fn(&PersonSpec, Option<&ListOptions>) -> Result<Vec<AugmentedPersonUsageByClient>>
        + Send
        + Sync,
>;
pub type PeopleListClientsFn = Box<
    dyn Fn(&PersonSpec, Option<&ListOptions>) -> Result<Vec<AugmentedPersonUsageOfAuthor>>
        + Send
        + Sync,
>;

/// [`PeopleService`] whose methods are closures set by the test
#[derive(Default)]
pub struct MockPeopleService {
    pub get: Option<PeopleGetFn>,
    pub get_or_create_from_github: Option<PeopleGetFromGitHubFn>,
    pub refresh_profile: Option<PeopleUpdateFn>,
    pub compute_stats: Option<PeopleUpdateFn>,
    pub list: Option<PeopleListFn>,
    pub list_authors: Option<PeopleListAuthorsFn>,
    pub list_clients: Option<PeopleListClientsFn>,
}

impl MockPeopleService {
    /// Make `get` return `want`
    pub fn mock_get_return(&mut self, want: Person) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.get = Some(Box::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(want.clone())
        }));
        called
    }

    /// Make `list` return `want`
    pub fn mock_list(&mut self, want: Vec<Person>) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.list = Some(Box::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(want.clone())
        }));
        called
    }

    /// Make `refresh_profile` succeed
    pub fn mock_refresh_profile(&mut self) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.refresh_profile = Some(Box::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        }));
        called
    }
}

#[async_trait]
impl PeopleService for MockPeopleService {
    async fn get(&self, spec: &PersonSpec) -> Result<Person> {
        let f = self
            .get
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::get"))?;
        f(spec)
    }

    async fn get_or_create_from_github(&self, spec: &GitHubUserSpec) -> Result<Person> {
        let f = self
            .get_or_create_from_github
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::get_or_create_from_github"))?;
        f(spec)
    }

    async fn refresh_profile(&self, spec: &PersonSpec) -> Result<()> {
        let f = self
            .refresh_profile
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::refresh_profile"))?;
        f(spec)
    }

    async fn compute_stats(&self, spec: &PersonSpec) -> Result<()> {
        let f = self
            .compute_stats
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::compute_stats"))?;
        f(spec)
    }

    async fn list(&self, opts: Option<&PersonListOptions>) -> Result<Vec<Person>> {
        let f = self
            .list
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::list"))?;
        f(opts)
    }

    async fn list_authors(
        &self,
        spec: &PersonSpec,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<AugmentedPersonUsageByClient>> {
        let f = self
            .list_authors
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::list_authors"))?;
        f(spec, opts)
    }

    async fn list_clients(
        &self,
        spec: &PersonSpec,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<AugmentedPersonUsageOfAuthor>> {
        let f = self
            .list_clients
            .as_ref()
            .ok_or_else(|| Error::not_implemented("PeopleService::list_clients"))?;
        f(spec, opts)
    }
}

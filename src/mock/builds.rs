//! Mock builds service

use super::called_flag;
use crate::client::BuildsService;
use crate::error::{Error, Result};
use crate::model::{
    Build, BuildCreateOptions, BuildListOptions, BuildSpec, BuildsGetRepoBuildInfoOptions,
    RepoBuildInfo, RepoRevSpec, RepoSpec,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type BuildsGetFn = Box<dyn Fn(&BuildSpec) -> Result<Build> + Send + Sync>;
pub type BuildsListFn = Box<dyn Fn(Option<&BuildListOptions>) -> Result<Vec<Build>> + Send + Sync>;
pub type BuildsListByRepositoryFn =
    Box<dyn Fn(&RepoSpec, Option<&BuildListOptions>) -> Result<Vec<Build>> + Send + Sync>;
pub type BuildsCreateFn = Box<dyn Fn(&RepoSpec, &BuildCreateOptions) -> Result<Build> + Send + Sync>;
pub type BuildsGetRepoBuildInfoFn = Box<
    dyn Fn(&RepoRevSpec, Option<&BuildsGetRepoBuildInfoOptions>) -> Result<RepoBuildInfo>
        + Send
        + Sync,
>;

/// [`BuildsService`] whose methods are closures set by the test
#[derive(Default)]
pub struct MockBuildsService {
    pub get: Option<BuildsGetFn>,
    pub list: Option<BuildsListFn>,
    pub list_by_repository: Option<BuildsListByRepositoryFn>,
    pub create: Option<BuildsCreateFn>,
    pub get_repo_build_info: Option<BuildsGetRepoBuildInfoFn>,
}

impl MockBuildsService {
    /// Make `get` return `want`
    pub fn mock_get_return(&mut self, want: Build) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.get = Some(Box::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(want.clone())
        }));
        called
    }

    /// Make `list` return `want`
    pub fn mock_list(&mut self, want: Vec<Build>) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.list = Some(Box::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(want.clone())
        }));
        called
    }

    /// Make `get_repo_build_info` return `info`
    pub fn mock_get_repo_build_info(&mut self, info: RepoBuildInfo) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.get_repo_build_info = Some(Box::new(move |_, _| {
            flag.store(true, Ordering::SeqCst);
            Ok(info.clone())
        }));
        called
    }
}

#[async_trait]
impl BuildsService for MockBuildsService {
    async fn get(&self, spec: &BuildSpec) -> Result<Build> {
        let f = self
            .get
            .as_ref()
            .ok_or_else(|| Error::not_implemented("BuildsService::get"))?;
        f(spec)
    }

    async fn list(&self, opts: Option<&BuildListOptions>) -> Result<Vec<Build>> {
        let f = self
            .list
            .as_ref()
            .ok_or_else(|| Error::not_implemented("BuildsService::list"))?;
        f(opts)
    }

    async fn list_by_repository(
        &self,
        repo: &RepoSpec,
        opts: Option<&BuildListOptions>,
    ) -> Result<Vec<Build>> {
        let f = self
            .list_by_repository
            .as_ref()
            .ok_or_else(|| Error::not_implemented("BuildsService::list_by_repository"))?;
        f(repo, opts)
    }

    async fn create(&self, repo: &RepoSpec, opts: &BuildCreateOptions) -> Result<Build> {
        let f = self
            .create
            .as_ref()
            .ok_or_else(|| Error::not_implemented("BuildsService::create"))?;
        f(repo, opts)
    }

    async fn get_repo_build_info(
        &self,
        spec: &RepoRevSpec,
        opts: Option<&BuildsGetRepoBuildInfoOptions>,
    ) -> Result<RepoBuildInfo> {
        let f = self
            .get_repo_build_info
            .as_ref()
            .ok_or_else(|| Error::not_implemented("BuildsService::get_repo_build_info"))?;
        f(spec, opts)
    }
}

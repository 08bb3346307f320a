//! Mock repository status service

use super::called_flag;
use crate::client::ReposService;
use crate::error::{Error, Result};
use crate::model::{CombinedStatus, RepoRevSpec, RepoStatus};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type ReposGetCombinedStatusFn = Box<dyn Fn(&RepoRevSpec) -> Result<CombinedStatus> + Send + Sync>;
pub type ReposCreateStatusFn =
    Box<dyn Fn(&RepoRevSpec, &RepoStatus) -> Result<RepoStatus> + Send + Sync>;

/// [`ReposService`] whose methods are closures set by the test
#[derive(Default)]
pub struct MockReposService {
    pub get_combined_status: Option<ReposGetCombinedStatusFn>,
    pub create_status: Option<ReposCreateStatusFn>,
}

impl MockReposService {
    /// Make `get_combined_status` return `want`
    pub fn mock_get_combined_status(&mut self, want: CombinedStatus) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.get_combined_status = Some(Box::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(want.clone())
        }));
        called
    }

    /// Make `create_status` echo the status it receives
    pub fn mock_create_status(&mut self) -> Arc<AtomicBool> {
        let (called, flag) = called_flag();
        self.create_status = Some(Box::new(move |_, status| {
            flag.store(true, Ordering::SeqCst);
            Ok(status.clone())
        }));
        called
    }
}

#[async_trait]
impl ReposService for MockReposService {
    async fn get_combined_status(&self, spec: &RepoRevSpec) -> Result<CombinedStatus> {
        let f = self
            .get_combined_status
            .as_ref()
            .ok_or_else(|| Error::not_implemented("ReposService::get_combined_status"))?;
        f(spec)
    }

    async fn create_status(&self, spec: &RepoRevSpec, status: &RepoStatus) -> Result<RepoStatus> {
        let f = self
            .create_status
            .as_ref()
            .ok_or_else(|| Error::not_implemented("ReposService::create_status"))?;
        f(spec, status)
    }
}

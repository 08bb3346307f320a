//! Service traits shared by the HTTP client and the mocks

use crate::error::Result;
use crate::model::{
    AugmentedPersonUsageByClient, AugmentedPersonUsageOfAuthor, Build, BuildCreateOptions,
    BuildListOptions, BuildSpec, BuildsGetRepoBuildInfoOptions, CombinedStatus, GitHubUserSpec,
    Person, PersonListOptions, PersonSpec, RepoBuildInfo, RepoRevSpec, RepoSpec, RepoStatus,
};
use crate::types::ListOptions;
use async_trait::async_trait;

/// Commit statuses of repository revisions
#[async_trait]
pub trait ReposService: Send + Sync {
    /// Combined status of every context reported for a revision
    async fn get_combined_status(&self, spec: &RepoRevSpec) -> Result<CombinedStatus>;

    /// Report a status for a revision
    async fn create_status(&self, spec: &RepoRevSpec, status: &RepoStatus) -> Result<RepoStatus>;
}

/// Builds of repositories
#[async_trait]
pub trait BuildsService: Send + Sync {
    async fn get(&self, spec: &BuildSpec) -> Result<Build>;

    /// List builds across all repositories
    async fn list(&self, opts: Option<&BuildListOptions>) -> Result<Vec<Build>>;

    /// List builds of one repository
    async fn list_by_repository(
        &self,
        repo: &RepoSpec,
        opts: Option<&BuildListOptions>,
    ) -> Result<Vec<Build>>;

    /// Create a build of a repository
    async fn create(&self, repo: &RepoSpec, opts: &BuildCreateOptions) -> Result<Build>;

    /// Build status of a repository revision
    async fn get_repo_build_info(
        &self,
        spec: &RepoRevSpec,
        opts: Option<&BuildsGetRepoBuildInfoOptions>,
    ) -> Result<RepoBuildInfo>;
}

/// Users and the relationships between their code
#[async_trait]
pub trait PeopleService: Send + Sync {
    async fn get(&self, spec: &PersonSpec) -> Result<Person>;

    /// Fetch a person by GitHub login, creating a transient user if needed
    async fn get_or_create_from_github(&self, spec: &GitHubUserSpec) -> Result<Person>;

    /// Refresh the person's profile from external sources
    async fn refresh_profile(&self, spec: &PersonSpec) -> Result<()>;

    /// Recompute the person's statistics
    async fn compute_stats(&self, spec: &PersonSpec) -> Result<()>;

    async fn list(&self, opts: Option<&PersonListOptions>) -> Result<Vec<Person>>;

    /// Authors whose code the person uses
    async fn list_authors(
        &self,
        spec: &PersonSpec,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<AugmentedPersonUsageByClient>>;

    /// People who use the person's code
    async fn list_clients(
        &self,
        spec: &PersonSpec,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<AugmentedPersonUsageOfAuthor>>;
}

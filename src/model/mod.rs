//! API resource types
//!
//! Typed specs (`RepoRevSpec`, `BuildSpec`, `PersonSpec`, ...) convert to and
//! from [`RouteVars`](crate::router::RouteVars); resources mirror the JSON the
//! API returns.

mod build;
mod person;
mod repo;

pub use build::{
    Build, BuildConfig, BuildCreateOptions, BuildListOptions, BuildSpec,
    BuildsGetRepoBuildInfoOptions, RepoBuildInfo, BID_VAR,
};
pub use person::{
    gravatar_url, AugmentedPersonUsageByClient, AugmentedPersonUsageOfAuthor, GitHubUserSpec,
    Person, PersonListOptions, PersonSpec, PersonStatType, PersonStats, Uid, User,
    DEFAULT_AVATAR_SIZE, GITHUB_USER_SPEC_VAR, PERSON_SPEC_VAR,
};
pub use repo::{CombinedStatus, RepoRevSpec, RepoSpec, RepoStatus};

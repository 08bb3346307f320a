//! Test doubles for the API
//!
//! The `Mock*Service` types implement the service traits with closures the
//! test installs, either directly or through `mock_*` helpers that return a
//! flag recording whether the method was called. [`MockApiServer`] serves
//! them over HTTP so a real [`Client`](crate::client::Client) can talk to
//! them.
//!
//! ```no_run
//! use sourcegraph_client::client::BuildsService;
//! use sourcegraph_client::mock::{MockApiServer, MockBuildsService, MockServices};
//! use sourcegraph_client::model::{Build, BuildSpec};
//! use std::sync::atomic::Ordering;
//!
//! # async fn example() -> sourcegraph_client::Result<()> {
//! let mut builds = MockBuildsService::default();
//! let called = builds.mock_get_return(Build { bid: 1, ..Default::default() });
//!
//! let server = MockApiServer::start(MockServices::default().with_builds(builds)).await?;
//! let build = server.client()?.builds().get(&BuildSpec::new(1)).await?;
//! assert!(called.load(Ordering::SeqCst));
//! # Ok(())
//! # }
//! ```

mod builds;
mod people;
mod repos;
mod server;

pub use builds::{
    BuildsCreateFn, BuildsGetFn, BuildsGetRepoBuildInfoFn, BuildsListByRepositoryFn,
    BuildsListFn, MockBuildsService,
};
pub use people::{
    MockPeopleService, PeopleGetFn, PeopleGetFromGitHubFn, PeopleListAuthorsFn,
    PeopleListClientsFn, PeopleListFn, PeopleUpdateFn,
};
pub use repos::{MockReposService, ReposCreateStatusFn, ReposGetCombinedStatusFn};
pub use server::{MockApiServer, MockServices};

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// A fresh "called" flag and the handle the installed closure sets
fn called_flag() -> (Arc<AtomicBool>, Arc<AtomicBool>) {
    let called = Arc::new(AtomicBool::new(false));
    (called.clone(), called)
}

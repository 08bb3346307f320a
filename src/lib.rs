// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Sourcegraph API client
//!
//! Typed client, route catalog and mock servers for the Sourcegraph REST API.
//!
//! ## Features
//!
//! - **Route Catalog**: Every endpoint as a named route that both matches and builds paths
//! - **Repository Paths**: `github.com/foo/bar@v1.2.3` in a single path segment, losslessly
//! - **Typed Services**: Repos, builds and people behind async traits
//! - **Mocks**: Closure-backed services and an in-process HTTP server for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sourcegraph_client::client::{BuildsService, Client};
//! use sourcegraph_client::model::{BuildListOptions, RepoSpec};
//!
//! #[tokio::main]
//! async fn main() -> sourcegraph_client::Result<()> {
//!     let client = Client::new()?;
//!
//!     let builds = client
//!         .builds()
//!         .list_by_repository(&RepoSpec::new("github.com/foo/bar"), None)
//!         .await?;
//!     for build in builds {
//!         println!("{} {}", build.bid, build.commit_id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │          Services: ReposService  BuildsService  PeopleService │
//! └───────────────────────────────────────────────────────────────┘
//!          │ HTTP impl (client)                │ mocks (mock)
//! ┌────────┴─────────┐                 ┌───────┴────────────────┐
//! │ prepare vars     │                 │ MockApiServer (axum)   │
//! │ Router::url      │ ── HttpClient ─▶│ Router::match_path     │
//! │                  │                 │ fix_repo_vars          │
//! └──────────────────┘                 └────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Route templates, the route catalog and repository path encoding
pub mod router;

/// API resource types and specs
pub mod model;

/// Authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Typed API client and service traits
pub mod client;

/// Mock services and mock API server
pub mod mock;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::{BuildsService, Client, PeopleService, ReposService};
pub use config::ClientConfig;
pub use router::{fix_repo_vars, prepare_repo_route_vars, RouteName, Router};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

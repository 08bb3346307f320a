//! CLI module
//!
//! Command-line interface for the route catalog and the API.
//!
//! # Commands
//!
//! - `routes` - List every route with its method and path template
//! - `match` - Match a method and path, printing normalized variables
//! - `url` - Build a route path from `KEY=VALUE` variables
//! - `status` - Fetch the combined status of a repository revision
//! - `build` / `builds` - Fetch builds
//! - `person` - Fetch a person

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

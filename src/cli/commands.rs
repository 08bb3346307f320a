//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sourcegraph API client CLI
#[derive(Parser, Debug)]
#[command(name = "sourcegraph-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every API route
    Routes,

    /// Match a request against the routes and print its variables
    Match {
        /// HTTP method, e.g. GET
        method: String,

        /// Request path, e.g. /repos/github.com/foo/bar@v1/.status
        path: String,
    },

    /// Build the path of a route
    Url {
        /// Route name, e.g. repo.combined-status
        route: String,

        /// Route variables as KEY=VALUE
        vars: Vec<String>,
    },

    /// Show the combined status of a repository revision
    Status {
        /// Repository, optionally with a revision: github.com/foo/bar@v1.2.3
        repo: String,
    },

    /// Show a build
    Build {
        /// Build ID
        bid: i64,
    },

    /// List builds
    Builds {
        /// Only builds of this repository
        #[arg(long)]
        repo: Option<String>,

        #[arg(long)]
        per_page: Option<u32>,

        #[arg(long)]
        page: Option<u32>,
    },

    /// Show a person by email, login or $UID
    Person {
        spec: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}

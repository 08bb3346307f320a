//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::{BuildsService, Client, PeopleService, ReposService};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::model::{BuildListOptions, BuildSpec, PersonSpec, RepoRevSpec, RepoSpec};
use crate::router::{
    fix_repo_vars, prepare_repo_route_vars, RouteName, RouteVars, Router, REPO_SPEC_VAR,
};
use crate::types::{ListOptions, Method};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
    router: Router,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            router: Router::new(),
        }
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return its output
    pub async fn execute(&self) -> Result<String> {
        match &self.cli.command {
            Commands::Routes => Ok(self.routes()),
            Commands::Match { method, path } => self.match_path(method, path),
            Commands::Url { route, vars } => self.url(route, vars),
            Commands::Status { repo } => {
                let spec = RepoRevSpec::parse(repo)?;
                let status = self.client()?.repos().get_combined_status(&spec).await?;
                self.render(&status)
            }
            Commands::Build { bid } => {
                let build = self.client()?.builds().get(&BuildSpec::new(*bid)).await?;
                self.render(&build)
            }
            Commands::Builds {
                repo,
                per_page,
                page,
            } => {
                let opts = BuildListOptions {
                    list: ListOptions {
                        per_page: *per_page,
                        page: *page,
                    },
                    ..Default::default()
                };
                let builds = self.client()?.builds();
                let builds = match repo {
                    Some(uri) => {
                        builds
                            .list_by_repository(&RepoSpec::new(uri.clone()), Some(&opts))
                            .await?
                    }
                    None => builds.list(Some(&opts)).await?,
                };
                self.render(&builds)
            }
            Commands::Person { spec } => {
                let spec = PersonSpec::parse(spec)?;
                let person = self.client()?.people().get(&spec).await?;
                self.render(&person)
            }
        }
    }

    /// API client from the configured file and environment
    fn client(&self) -> Result<Client> {
        let config = ClientConfig::load(self.cli.config.as_deref())?;
        debug!(?config, "Loaded client config");
        Client::from_config(&config)
    }

    fn routes(&self) -> String {
        self.router
            .routes()
            .map(|route| {
                format!(
                    "{:<24} {:<6} {}",
                    route.name().as_str(),
                    route.method().as_str(),
                    route.pattern().template()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn match_path(&self, method: &str, path: &str) -> Result<String> {
        let method: Method = method.parse()?;
        let matched = self.router.match_path(method, path)?;
        let vars = if self.has_repo_rev(matched.route) {
            fix_repo_vars(matched.vars)
        } else {
            matched.vars
        };
        self.render(&json!({ "route": matched.route, "vars": vars }))
    }

    fn url(&self, route: &str, pairs: &[String]) -> Result<String> {
        let name: RouteName = route.parse()?;
        let vars = parse_vars(pairs)?;
        let vars = if self.has_repo_rev(name) {
            if !vars.contains_key(REPO_SPEC_VAR) {
                return Err(Error::missing_route_var(name.as_str(), REPO_SPEC_VAR));
            }
            prepare_repo_route_vars(vars)
        } else {
            vars
        };
        self.router.url(name, &vars)
    }

    fn has_repo_rev(&self, name: RouteName) -> bool {
        self.router
            .route(name)
            .is_some_and(|route| route.has_repo_rev())
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(output)
    }
}

/// Parse `KEY=VALUE` arguments into route variables
fn parse_vars(pairs: &[String]) -> Result<RouteVars> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| Error::config(format!("expected KEY=VALUE, got {pair:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["sourcegraph-client"];
        argv.extend_from_slice(args);
        Runner::new(Cli::parse_from(argv))
    }

    #[tokio::test]
    async fn test_routes_lists_catalog() {
        let output = runner(&["routes"]).execute().await.unwrap();
        assert_eq!(output.lines().count(), RouteName::ALL.len());
        assert!(output.contains("repo.combined-status"));
        assert!(output.contains("/ext/github/users/"));
    }

    #[tokio::test]
    async fn test_match_normalizes_rev() {
        let output = runner(&[
            "-f",
            "json",
            "match",
            "GET",
            "/repos/github.com/foo/bar@v1.2.3/.status",
        ])
        .execute()
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["route"], "repo.combined-status");
        assert_eq!(value["vars"]["RepoSpec"], "github.com/foo/bar");
        assert_eq!(value["vars"]["Rev"], "v1.2.3");
    }

    #[tokio::test]
    async fn test_match_without_rev_has_no_rev() {
        let output = runner(&["-f", "json", "match", "get", "/repos/github.com/foo/bar/.status"])
            .execute()
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["vars"].get("Rev").is_none());
    }

    #[tokio::test]
    async fn test_match_rejects_hidden_repo() {
        let err = runner(&["match", "GET", "/repos/.hidden/repo/.status"])
            .execute()
            .await
            .unwrap_err();
        assert!(err.is_route_mismatch());
    }

    #[tokio::test]
    async fn test_url_denormalizes_rev() {
        let output = runner(&[
            "url",
            "repo.combined-status",
            "RepoSpec=github.com/foo/bar",
            "Rev=v1.2.3",
        ])
        .execute()
        .await
        .unwrap();
        assert_eq!(output, "/repos/github.com/foo/bar@v1.2.3/.status");

        let output = runner(&["url", "build", "BID=42"]).execute().await.unwrap();
        assert_eq!(output, "/builds/42");
    }

    #[tokio::test]
    async fn test_url_bad_arguments() {
        let err = runner(&["url", "no.such.route"]).execute().await.unwrap_err();
        assert!(matches!(err, Error::UnknownRoute { .. }));

        let err = runner(&["url", "build", "BID"]).execute().await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_url_repo_route_without_repo_is_an_error() {
        let err = runner(&["url", "repo.combined-status", "Rev=v1"])
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRouteVar { ref route, ref variable }
                if route == "repo.combined-status" && variable == "RepoSpec"
        ));
    }

    #[tokio::test]
    async fn test_status_fetches_from_configured_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/github.com/foo/bar@v1/.status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"state": "success"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: {}\nrequests_per_second: null", server.uri()).unwrap();
        let config_path = file.path().to_string_lossy().to_string();

        let output = runner(&[
            "-c",
            &config_path,
            "-f",
            "json",
            "status",
            "github.com/foo/bar@v1",
        ])
        .execute()
        .await
        .unwrap();

        assert_eq!(output, r#"{"state":"success"}"#);
    }

    #[test]
    fn test_parse_vars() {
        let vars = parse_vars(&["A=1".to_string(), "B=x=y".to_string()]).unwrap();
        assert_eq!(vars["A"], "1");
        assert_eq!(vars["B"], "x=y");
    }
}

//! In-process HTTP server backed by mock services

use super::{MockBuildsService, MockPeopleService, MockReposService};
use crate::client::{BuildsService, Client, PeopleService, ReposService};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::model::{
    BuildCreateOptions, BuildListOptions, BuildSpec, BuildsGetRepoBuildInfoOptions,
    GitHubUserSpec, PersonListOptions, PersonSpec, RepoRevSpec, RepoSpec, RepoStatus,
};
use crate::router::{fix_repo_vars, Route, RouteName, Router};
use crate::types::{JsonValue, ListOptions, Method};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method as HttpMethod, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Service implementations the server dispatches to
#[derive(Clone)]
pub struct MockServices {
    pub repos: Arc<dyn ReposService>,
    pub builds: Arc<dyn BuildsService>,
    pub people: Arc<dyn PeopleService>,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            repos: Arc::new(MockReposService::default()),
            builds: Arc::new(MockBuildsService::default()),
            people: Arc::new(MockPeopleService::default()),
        }
    }
}

impl MockServices {
    #[must_use]
    pub fn with_repos(mut self, repos: impl ReposService + 'static) -> Self {
        self.repos = Arc::new(repos);
        self
    }

    #[must_use]
    pub fn with_builds(mut self, builds: impl BuildsService + 'static) -> Self {
        self.builds = Arc::new(builds);
        self
    }

    #[must_use]
    pub fn with_people(mut self, people: impl PeopleService + 'static) -> Self {
        self.people = Arc::new(people);
        self
    }
}

/// Shared handler state
struct ServerState {
    router: Arc<Router>,
    services: MockServices,
}

/// API server on an ephemeral local port. Stops when dropped.
pub struct MockApiServer {
    addr: SocketAddr,
    router: Arc<Router>,
    handle: JoinHandle<()>,
}

impl MockApiServer {
    /// Bind `127.0.0.1:0` and serve the mock services
    pub async fn start(services: MockServices) -> Result<Self> {
        let router = Arc::new(Router::new());
        let app = Self::app(router.clone(), services);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .map_err(|e| Error::config(format!("Failed to bind mock API server: {e}")))?;
        let addr = listener.local_addr()?;
        info!("Starting mock API server on http://{}", addr);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock API server stopped");
            }
        });

        Ok(Self {
            addr,
            router,
            handle,
        })
    }

    /// The axum application, for driving without a socket
    pub fn app(router: Arc<Router>, services: MockServices) -> axum::Router {
        axum::Router::new()
            .fallback(handle_request)
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::new(ServerState { router, services }))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`
    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client pointed at this server
    pub fn client(&self) -> Result<Client> {
        let config = HttpClientConfig::builder()
            .base_url(self.uri())
            .no_rate_limit()
            .max_retries(0)
            .build();
        Ok(Client::with_router(
            HttpClient::with_config(config)?,
            self.router.clone(),
        ))
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(state): State<Arc<ServerState>>,
    method: HttpMethod,
    uri: Uri,
    body: Bytes,
) -> Response {
    match dispatch(&state, &method, &uri, &body).await {
        Ok((status, value)) => (status, Json(value)).into_response(),
        Err(err) => {
            debug!(%method, %uri, error = %err, "Mock API request failed");
            (error_status(&err), err.to_string()).into_response()
        }
    }
}

/// Match the request, decode its specs and call the matching service method
async fn dispatch(
    state: &ServerState,
    method: &HttpMethod,
    uri: &Uri,
    body: &[u8],
) -> Result<(StatusCode, JsonValue)> {
    let path = uri.path();
    let method: Method = method
        .as_str()
        .parse()
        .map_err(|_| Error::route_mismatch(method.as_str(), path))?;

    let matched = state.router.match_path(method, path)?;
    let vars = if state
        .router
        .route(matched.route)
        .is_some_and(Route::has_repo_rev)
    {
        fix_repo_vars(matched.vars)
    } else {
        matched.vars
    };
    let services = &state.services;

    match matched.route {
        RouteName::Builds => {
            let opts: Option<BuildListOptions> = query_options(uri)?;
            json(StatusCode::OK, &services.builds.list(opts.as_ref()).await?)
        }
        RouteName::Build => {
            let spec = BuildSpec::from_route_vars(&vars)?;
            json(StatusCode::OK, &services.builds.get(&spec).await?)
        }
        RouteName::RepoBuilds => {
            let repo = RepoSpec::from_route_vars(&vars)?;
            let opts: Option<BuildListOptions> = query_options(uri)?;
            let builds = services
                .builds
                .list_by_repository(&repo, opts.as_ref())
                .await?;
            json(StatusCode::OK, &builds)
        }
        RouteName::RepoBuildsCreate => {
            let repo = RepoSpec::from_route_vars(&vars)?;
            let opts: BuildCreateOptions = serde_json::from_slice(body)?;
            json(
                StatusCode::CREATED,
                &services.builds.create(&repo, &opts).await?,
            )
        }
        RouteName::RepoBuildInfo => {
            let spec = RepoRevSpec::from_route_vars(&vars)?;
            let opts: Option<BuildsGetRepoBuildInfoOptions> = query_options(uri)?;
            let info = services
                .builds
                .get_repo_build_info(&spec, opts.as_ref())
                .await?;
            json(StatusCode::OK, &info)
        }
        RouteName::RepoCombinedStatus => {
            let spec = RepoRevSpec::from_route_vars(&vars)?;
            json(
                StatusCode::OK,
                &services.repos.get_combined_status(&spec).await?,
            )
        }
        RouteName::RepoStatusCreate => {
            let spec = RepoRevSpec::from_route_vars(&vars)?;
            let status: RepoStatus = serde_json::from_slice(body)?;
            json(
                StatusCode::CREATED,
                &services.repos.create_status(&spec, &status).await?,
            )
        }
        RouteName::People => {
            let opts: Option<PersonListOptions> = query_options(uri)?;
            json(StatusCode::OK, &services.people.list(opts.as_ref()).await?)
        }
        RouteName::Person => {
            let spec = PersonSpec::from_route_vars(&vars)?;
            json(StatusCode::OK, &services.people.get(&spec).await?)
        }
        RouteName::PersonAuthors => {
            let spec = PersonSpec::from_route_vars(&vars)?;
            let opts: Option<ListOptions> = query_options(uri)?;
            let authors = services
                .people
                .list_authors(&spec, opts.as_ref())
                .await?;
            json(StatusCode::OK, &authors)
        }
        RouteName::PersonClients => {
            let spec = PersonSpec::from_route_vars(&vars)?;
            let opts: Option<ListOptions> = query_options(uri)?;
            let clients = services
                .people
                .list_clients(&spec, opts.as_ref())
                .await?;
            json(StatusCode::OK, &clients)
        }
        RouteName::PersonRefreshProfile => {
            let spec = PersonSpec::from_route_vars(&vars)?;
            services.people.refresh_profile(&spec).await?;
            Ok((StatusCode::OK, JsonValue::Null))
        }
        RouteName::PersonComputeStats => {
            let spec = PersonSpec::from_route_vars(&vars)?;
            services.people.compute_stats(&spec).await?;
            Ok((StatusCode::OK, JsonValue::Null))
        }
        RouteName::PersonFromGitHub => {
            let spec = GitHubUserSpec::from_route_vars(&vars)?;
            json(
                StatusCode::OK,
                &services.people.get_or_create_from_github(&spec).await?,
            )
        }
    }
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<(StatusCode, JsonValue)> {
    Ok((status, serde_json::to_value(value)?))
}

/// Decode the query string into an options struct; `None` without a query
fn query_options<T: DeserializeOwned>(uri: &Uri) -> Result<Option<T>> {
    if uri.query().map_or(true, str::is_empty) {
        return Ok(None);
    }
    let Query(opts) =
        Query::try_from_uri(uri).map_err(|rejection| Error::invalid_query(rejection.body_text()))?;
    Ok(Some(opts))
}

fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::RouteMismatch { .. } | Error::PersonNotExist => StatusCode::NOT_FOUND,
        Error::InvalidRepoSpec { .. }
        | Error::InvalidPersonSpec { .. }
        | Error::InvalidRouteVar { .. }
        | Error::MissingRouteVar { .. }
        | Error::InvalidQuery { .. }
        | Error::JsonParse(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

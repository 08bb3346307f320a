//! Tests for the API client, against a wiremock server

use super::*;
use crate::error::Error;
use crate::http::HttpClientConfig;
use crate::model::{
    AugmentedPersonUsageByClient, AugmentedPersonUsageOfAuthor, Build, BuildConfig,
    BuildCreateOptions, BuildListOptions, BuildSpec, BuildsGetRepoBuildInfoOptions,
    CombinedStatus, GitHubUserSpec, Person, PersonListOptions, PersonSpec, RepoBuildInfo,
    RepoSpec, RepoStatus, User,
};
use crate::router::{REPO_SPEC_VAR, REV_VAR};
use crate::types::ListOptions;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .max_retries(0)
        .build();
    let client = Client::with_http(HttpClient::with_config(config).unwrap());
    (server, client)
}

/// Path of a route, built the way the server side expects it
fn url_path(name: RouteName, vars: &[(&str, &str)]) -> String {
    let vars: RouteVars = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let vars = if Router::new()
        .route(name)
        .is_some_and(|route| route.has_repo_rev())
    {
        prepare_repo_route_vars(vars)
    } else {
        vars
    };
    Router::new().url(name, &vars).unwrap()
}

fn person(uid: i32, login: &str) -> Person {
    Person::from(User {
        uid,
        login: login.to_string(),
        ..Default::default()
    })
}

// ============================================================================
// Repos
// ============================================================================

#[tokio::test]
async fn test_repos_get_combined_status() {
    let (server, client) = setup().await;
    let want = CombinedStatus {
        sha: Some("s".to_string()),
        ..Default::default()
    };

    let status_path = url_path(
        RouteName::RepoCombinedStatus,
        &[(REPO_SPEC_VAR, "r.com/x"), (REV_VAR, "r")],
    );
    assert_eq!(status_path, "/repos/r.com/x@r/.status");

    Mock::given(method("GET"))
        .and(path(status_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let status = client
        .repos()
        .get_combined_status(&RepoRevSpec::new("r.com/x").with_rev("r"))
        .await
        .unwrap();

    assert_eq!(status, want);
}

#[tokio::test]
async fn test_repos_get_combined_status_default_rev() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/r.com/x/.status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let status = client
        .repos()
        .get_combined_status(&RepoRevSpec::new("r.com/x"))
        .await
        .unwrap();

    assert_eq!(status.state.as_deref(), Some("success"));
}

#[tokio::test]
async fn test_repos_create_status() {
    let (server, client) = setup().await;
    let status = RepoStatus::with_state("success");

    Mock::given(method("POST"))
        .and(path(
            url_path(
                RouteName::RepoStatusCreate,
                &[(REPO_SPEC_VAR, "r.com/x"), (REV_VAR, "r")],
            )
            .as_str(),
        ))
        .and(body_json(&status))
        .respond_with(ResponseTemplate::new(201).set_body_json(&status))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .repos()
        .create_status(&RepoRevSpec::new("r.com/x").with_rev("r"), &status)
        .await
        .unwrap();

    assert_eq!(created, status);
}

// ============================================================================
// Builds
// ============================================================================

#[tokio::test]
async fn test_builds_get() {
    let (server, client) = setup().await;
    let want = Build {
        bid: 1,
        repo: 1,
        ..Default::default()
    };

    Mock::given(method("GET"))
        .and(path(url_path(RouteName::Build, &[("BID", "1")]).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let build = client.builds().get(&BuildSpec::new(1)).await.unwrap();
    assert_eq!(build, want);
}

#[tokio::test]
async fn test_builds_list() {
    let (server, client) = setup().await;
    let want = vec![Build {
        bid: 1,
        ..Default::default()
    }];

    Mock::given(method("GET"))
        .and(path(url_path(RouteName::Builds, &[]).as_str()))
        .and(query_param("Queued", "true"))
        .and(query_param("PerPage", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let opts = BuildListOptions {
        queued: true,
        list: ListOptions {
            per_page: Some(5),
            page: None,
        },
        ..Default::default()
    };
    let builds = client.builds().list(Some(&opts)).await.unwrap();

    assert_eq!(builds, want);
}

#[tokio::test]
async fn test_builds_list_by_repository() {
    let (server, client) = setup().await;
    let want = vec![Build {
        bid: 1,
        repo: 7,
        ..Default::default()
    }];

    Mock::given(method("GET"))
        .and(path("/repos/r.com/x/.builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let builds = client
        .builds()
        .list_by_repository(&RepoSpec::new("r.com/x"), None)
        .await
        .unwrap();

    assert_eq!(builds, want);
}

#[tokio::test]
async fn test_builds_create() {
    let (server, client) = setup().await;
    let config = BuildCreateOptions {
        config: BuildConfig {
            import: true,
            queue: true,
            ..Default::default()
        },
        force: true,
    };
    let want = Build {
        bid: 123,
        repo: 456,
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path(
            url_path(RouteName::RepoBuildsCreate, &[(REPO_SPEC_VAR, "r.com/x")]).as_str(),
        ))
        .and(body_json(json!({
            "Import": true,
            "Queue": true,
            "UseCache": false,
            "Priority": 0,
            "Force": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let build = client
        .builds()
        .create(&RepoSpec::new("r.com/x"), &config)
        .await
        .unwrap();

    assert_eq!(build, want);
}

#[tokio::test]
async fn test_builds_get_repo_build_info() {
    let (server, client) = setup().await;
    let want = RepoBuildInfo {
        commits_behind: 3,
        ..Default::default()
    };

    Mock::given(method("GET"))
        .and(path("/repos/r.com/x@main/.build-info"))
        .and(query_param("Exact", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let info = client
        .builds()
        .get_repo_build_info(
            &RepoRevSpec::new("r.com/x").with_rev("main"),
            Some(&BuildsGetRepoBuildInfoOptions { exact: true }),
        )
        .await
        .unwrap();

    assert_eq!(info, want);
}

// ============================================================================
// People
// ============================================================================

#[tokio::test]
async fn test_people_get() {
    let (server, client) = setup().await;
    let want = person(1, "");

    Mock::given(method("GET"))
        .and(path(url_path(RouteName::Person, &[("PersonSpec", "a")]).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let got = client.people().get(&PersonSpec::login("a")).await.unwrap();
    assert_eq!(got, want);
}

#[tokio::test]
async fn test_people_get_missing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/people/$9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client.people().get(&PersonSpec::uid(9)).await.unwrap_err();
    assert!(matches!(err, Error::PersonNotExist));
}

#[tokio::test]
async fn test_people_get_empty_spec() {
    let (_server, client) = setup().await;

    let err = client
        .people()
        .get(&PersonSpec::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPersonSpec { .. }));
}

#[tokio::test]
async fn test_people_get_or_create_from_github() {
    let (server, client) = setup().await;
    let want = person(1, "a");

    Mock::given(method("GET"))
        .and(path(
            url_path(RouteName::PersonFromGitHub, &[("GitHubUserSpec", "a")]).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let got = client
        .people()
        .get_or_create_from_github(&GitHubUserSpec::new("a"))
        .await
        .unwrap();
    assert_eq!(got, want);
}

#[tokio::test]
async fn test_people_refresh_profile() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(
            url_path(RouteName::PersonRefreshProfile, &[("PersonSpec", "a")]).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .people()
        .refresh_profile(&PersonSpec::login("a"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_people_compute_stats() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/people/a@b.com/.compute-stats"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .people()
        .compute_stats(&PersonSpec::email("a@b.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_people_list() {
    let (server, client) = setup().await;
    let want = vec![person(1, "")];

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("NameOrLogin", "nl"))
        .and(query_param("Sort", "name"))
        .and(query_param("Direction", "asc"))
        .and(query_param("PerPage", "1"))
        .and(query_param("Page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let opts = PersonListOptions {
        name_or_login: "nl".to_string(),
        sort: "name".to_string(),
        direction: "asc".to_string(),
        list: ListOptions::new(1, 2),
    };
    let people = client.people().list(Some(&opts)).await.unwrap();

    assert_eq!(people, want);
}

#[tokio::test]
async fn test_people_list_authors() {
    let (server, client) = setup().await;
    let want = vec![AugmentedPersonUsageByClient {
        author: Some(User {
            uid: 1,
            ..Default::default()
        }),
    }];

    Mock::given(method("GET"))
        .and(path(
            url_path(RouteName::PersonAuthors, &[("PersonSpec", "a")]).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let authors = client
        .people()
        .list_authors(&PersonSpec::login("a"), None)
        .await
        .unwrap();

    assert_eq!(authors, want);
}

#[tokio::test]
async fn test_people_list_clients() {
    let (server, client) = setup().await;
    let want = vec![AugmentedPersonUsageOfAuthor {
        client: Some(User {
            uid: 1,
            ..Default::default()
        }),
    }];

    Mock::given(method("GET"))
        .and(path(
            url_path(RouteName::PersonClients, &[("PersonSpec", "a")]).as_str(),
        ))
        .and(query_param("Page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&want))
        .expect(1)
        .mount(&server)
        .await;

    let clients = client
        .people()
        .list_clients(
            &PersonSpec::login("a"),
            Some(&ListOptions {
                per_page: None,
                page: Some(3),
            }),
        )
        .await
        .unwrap();

    assert_eq!(clients, want);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_server_error_is_returned() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/builds/5"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.builds().get(&BuildSpec::new(5)).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, ref body } if body == "boom"));
}

#[test]
fn test_query_config_omits_unset_options() {
    let config = query_config::<BuildListOptions>(None).unwrap();
    assert!(config.query.is_empty());

    let config = query_config(Some(&BuildListOptions::default())).unwrap();
    assert!(config.query.is_empty());
}

//! Repository path segment encoding
//!
//! A repository reference travels in a URL as a single path segment,
//! `<URI>` or `<URI>@<Rev>`. Routes declare it with [`REPO_PATH_PATTERN`],
//! which splits the segment into a `RepoSpec` and a raw `Rev` variable
//! (leading `@` included).
//!
//! The two functions here convert between the raw variables a route
//! produces or consumes and the normalized variables typed specs use:
//!
//! - [`fix_repo_vars`] after a path has matched
//! - [`prepare_repo_route_vars`] before a path is built

use super::pattern::RouteVars;

/// Route variable holding the repository URI
pub const REPO_SPEC_VAR: &str = "RepoSpec";

/// Route variable holding the (optional) revision
pub const REV_VAR: &str = "Rev";

macro_rules! repo_spec_path_pattern {
    () => {
        r"{RepoSpec:(?:[^/.@][^/@]*/)+(?:[^/.@][^/@]*)}"
    };
}

macro_rules! repo_path_pattern {
    () => {
        concat!(
            $crate::router::repo::repo_spec_path_pattern!(),
            r"{Rev:(?:@[A-Za-z0-9_.-]+)?}"
        )
    };
}

pub(crate) use {repo_path_pattern, repo_spec_path_pattern};

/// Path pattern for repository URIs.
///
/// Segments are `/`-separated, may not be empty, and may not start with `.`
/// or contain `@`. The leading-dot rule keeps `/.builds`-style suffixes out
/// of the URI.
pub const REPO_SPEC_PATH_PATTERN: &str = repo_spec_path_pattern!();

/// Path pattern for repository URIs with an optional `@revision` suffix
pub const REPO_PATH_PATTERN: &str = repo_path_pattern!();

/// Normalize variables from a matched repository route.
///
/// An empty `Rev` (no revision in the path) is removed and a non-empty one
/// loses its leading `@`. A mapping without `Rev` is returned unchanged.
pub fn fix_repo_vars(mut vars: RouteVars) -> RouteVars {
    if let Some(rev) = vars.remove(REV_VAR) {
        if !rev.is_empty() {
            let bare = rev.strip_prefix('@').unwrap_or(&rev).to_string();
            vars.insert(REV_VAR.to_string(), bare);
        }
    }
    vars
}

/// Convert normalized repository variables into route variables.
///
/// A missing `Rev` becomes `""` so the route builds without a revision
/// suffix; a non-empty one gets its `@` back. Apply exactly once per build.
///
/// # Panics
///
/// Panics if `vars` has no `RepoSpec`. Building a repository route without
/// one is a caller bug.
pub fn prepare_repo_route_vars(mut vars: RouteVars) -> RouteVars {
    assert!(
        vars.contains_key(REPO_SPEC_VAR),
        "repository route vars must contain {REPO_SPEC_VAR}: {vars:?}"
    );

    if let Some(rev) = vars.get_mut(REV_VAR) {
        if !rev.is_empty() {
            rev.insert(0, '@');
        }
    } else {
        vars.insert(REV_VAR.to_string(), String::new());
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::pattern::PathPattern;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn vars(pairs: &[(&str, &str)]) -> RouteVars {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn repo_pattern() -> PathPattern {
        PathPattern::parse(REPO_PATH_PATTERN).unwrap()
    }

    #[test]
    fn test_fix_repo_vars_strips_at() {
        let fixed = fix_repo_vars(vars(&[("RepoSpec", "r.com/x"), ("Rev", "@v1.2.3")]));
        assert_eq!(fixed, vars(&[("RepoSpec", "r.com/x"), ("Rev", "v1.2.3")]));
    }

    #[test]
    fn test_fix_repo_vars_removes_empty_rev() {
        let fixed = fix_repo_vars(vars(&[("RepoSpec", "r.com/x"), ("Rev", "")]));
        assert_eq!(fixed, vars(&[("RepoSpec", "r.com/x")]));
        assert!(!fixed.contains_key(REV_VAR));
    }

    #[test]
    fn test_fix_repo_vars_without_rev_is_unchanged() {
        let input = vars(&[("RepoSpec", "r.com/x"), ("BID", "1")]);
        assert_eq!(fix_repo_vars(input.clone()), input);
    }

    #[test]
    fn test_fix_repo_vars_strips_only_one_at() {
        let fixed = fix_repo_vars(vars(&[("RepoSpec", "r.com/x"), ("Rev", "@@x")]));
        assert_eq!(fixed[REV_VAR], "@x");
    }

    #[test]
    fn test_prepare_inserts_empty_rev() {
        let prepared = prepare_repo_route_vars(vars(&[("RepoSpec", "r.com/x")]));
        assert_eq!(prepared, vars(&[("RepoSpec", "r.com/x"), ("Rev", "")]));
    }

    #[test]
    fn test_prepare_prefixes_rev() {
        let prepared = prepare_repo_route_vars(vars(&[("RepoSpec", "r.com/x"), ("Rev", "r")]));
        assert_eq!(prepared[REV_VAR], "@r");
    }

    #[test]
    fn test_prepare_keeps_empty_rev() {
        let prepared = prepare_repo_route_vars(vars(&[("RepoSpec", "r.com/x"), ("Rev", "")]));
        assert_eq!(prepared[REV_VAR], "");
    }

    #[test]
    #[should_panic(expected = "must contain RepoSpec")]
    fn test_prepare_without_repo_spec_panics() {
        prepare_repo_route_vars(vars(&[("Rev", "r")]));
    }

    #[test]
    fn test_round_trip_with_rev() {
        let pattern = repo_pattern();
        let input = vars(&[("RepoSpec", "github.com/foo/bar"), ("Rev", "v1.2.3")]);

        let path = pattern.build(&prepare_repo_route_vars(input.clone())).unwrap();
        assert_eq!(path, "github.com/foo/bar@v1.2.3");

        let matched = pattern.captures(&path).unwrap();
        assert_eq!(fix_repo_vars(matched), input);
    }

    #[test]
    fn test_round_trip_without_rev() {
        let pattern = repo_pattern();
        let input = vars(&[("RepoSpec", "github.com/foo/bar")]);

        let path = pattern.build(&prepare_repo_route_vars(input.clone())).unwrap();
        assert_eq!(path, "github.com/foo/bar");

        let matched = pattern.captures(&path).unwrap();
        assert_eq!(matched[REV_VAR], "");
        assert_eq!(fix_repo_vars(matched), input);
    }

    #[test]
    fn test_double_prepare_is_rejected_at_build() {
        let pattern = repo_pattern();
        let once = prepare_repo_route_vars(vars(&[("RepoSpec", "a.com/b"), ("Rev", "x")]));
        let twice = prepare_repo_route_vars(once);
        assert_eq!(twice[REV_VAR], "@@x");
        assert!(pattern.build(&twice).is_err());
    }

    #[test_case("github.com/foo/bar", "github.com/foo/bar", None; "no revision")]
    #[test_case("github.com/foo/bar@v1.2.3", "github.com/foo/bar", Some("v1.2.3"); "tag")]
    #[test_case("github.com/foo/bar@deadbeef01", "github.com/foo/bar", Some("deadbeef01"); "commit")]
    #[test_case("owner/repo@branch-name_1.0", "owner/repo", Some("branch-name_1.0"); "branch")]
    #[test_case("a/b.c/d-e", "a/b.c/d-e", None; "dots inside segments")]
    fn test_accepts(path: &str, uri: &str, rev: Option<&str>) {
        let fixed = fix_repo_vars(repo_pattern().captures(path).unwrap());
        assert_eq!(fixed[REPO_SPEC_VAR], uri);
        assert_eq!(fixed.get(REV_VAR).map(String::as_str), rev);
    }

    #[test_case(""; "empty")]
    #[test_case(".hidden/repo"; "leading dot")]
    #[test_case("a/.hidden"; "leading dot in later segment")]
    #[test_case("a/"; "trailing empty segment")]
    #[test_case("a//b"; "empty middle segment")]
    #[test_case("/a/b"; "leading slash")]
    #[test_case("@a/b"; "leading at")]
    #[test_case("owner/repo@has space"; "space in revision")]
    #[test_case("owner/repo@"; "empty revision")]
    #[test_case("owner/repo@a/b"; "slash in revision")]
    #[test_case("owner/repo@a@b"; "second at")]
    fn test_rejects(path: &str) {
        assert_eq!(repo_pattern().captures(path), None);
    }

    #[test]
    fn test_single_segment_is_not_a_repo() {
        assert_eq!(repo_pattern().captures("repo"), None);
        assert!(PathPattern::parse(REPO_SPEC_PATH_PATTERN)
            .unwrap()
            .captures("repo")
            .is_none());
    }
}

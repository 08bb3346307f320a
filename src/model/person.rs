//! Users, organizations and the specs that address them

use crate::error::{Error, Result};
use crate::router::RouteVars;
use crate::types::ListOptions;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Route variable holding a person path component
pub const PERSON_SPEC_VAR: &str = "PersonSpec";

/// Route variable holding a GitHub login
pub const GITHUB_USER_SPEC_VAR: &str = "GitHubUserSpec";

/// Size, in pixels, of avatar images if no size is specified
pub const DEFAULT_AVATAR_SIZE: u16 = 128;

/// Numeric primary key of a user
pub type Uid = i32;

// ============================================================================
// User
// ============================================================================

/// A user or organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "UID")]
    pub uid: Uid,
    /// ID of the corresponding GitHub account
    #[serde(rename = "GitHubID", default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<i64>,
    /// Username, usually the GitHub login
    #[serde(default)]
    pub login: String,
    /// Full name, possibly empty
    #[serde(default)]
    pub name: String,
    /// `User` or `Organization`
    #[serde(default)]
    pub r#type: String,
    #[serde(rename = "AvatarURL", default)]
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(rename = "HomepageURL", default, skip_serializing_if = "String::is_empty")]
    pub homepage_url: String,
    /// Constructed on the fly, not persisted or resolved to a real account
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub transient: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub user_profile_disabled: bool,
    /// None until the user signs in for the first time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl User {
    /// The GitHub login. Identical to `login` for now; call this when the
    /// GitHub login specifically is meant.
    pub fn github_login(&self) -> &str {
        &self.login
    }

    pub fn is_organization(&self) -> bool {
        self.r#type == "Organization"
    }

    pub fn avatar_url_of_size(&self, width: u32) -> String {
        format!("{}&s={width}", self.avatar_url)
    }

    pub fn can_own_repositories(&self) -> bool {
        !self.github_login().is_empty()
    }

    /// Organizations cannot author commits; users and transient users can
    pub fn can_attribute_code_to(&self) -> bool {
        !self.is_organization()
    }

    /// Whether the user can be re-synced from where it was fetched
    pub fn can_sync(&self) -> bool {
        !self.transient
    }

    pub fn spec(&self) -> PersonSpec {
        PersonSpec {
            login: self.login.clone(),
            uid: self.uid,
            ..Default::default()
        }
    }
}

/// Gravatar avatar URL for an email address. A size of 0 means
/// [`DEFAULT_AVATAR_SIZE`].
pub fn gravatar_url(email: &str, size: u16) -> String {
    let size = if size == 0 { DEFAULT_AVATAR_SIZE } else { size };
    let digest = Md5::digest(email.as_bytes());
    format!(
        "https://secure.gravatar.com/avatar/{}?s={size}&d=mm",
        hex::encode(digest)
    )
}

/// A person as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(flatten)]
    pub user: User,
}

impl From<User> for Person {
    fn from(user: User) -> Self {
        Self { user }
    }
}

// ============================================================================
// Person Specs
// ============================================================================

/// Addresses a person by email, login or UID (first non-empty wins)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub login: String,
    #[serde(rename = "UID", default)]
    pub uid: Uid,
}

impl PersonSpec {
    pub fn login(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Default::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn uid(uid: Uid) -> Self {
        Self {
            uid,
            ..Default::default()
        }
    }

    /// Path component: the email, else the login, else `$<UID>`
    pub fn path_component(&self) -> Result<String> {
        if !self.email.is_empty() {
            Ok(self.email.clone())
        } else if !self.login.is_empty() {
            Ok(self.login.clone())
        } else if self.uid > 0 {
            Ok(format!("${}", self.uid))
        } else {
            Err(Error::invalid_person_spec("", "empty person spec"))
        }
    }

    /// Parse a path component produced by [`PersonSpec::path_component`]
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(uid) = s.strip_prefix('$') {
            let uid: Uid = uid
                .parse()
                .map_err(|e| Error::invalid_person_spec(s, format!("bad UID: {e}")))?;
            if uid <= 0 {
                return Err(Error::invalid_person_spec(s, "UID must be positive"));
            }
            return Ok(Self::uid(uid));
        }
        if s.is_empty() {
            return Err(Error::invalid_person_spec(s, "empty person spec"));
        }
        if s.contains('@') {
            return Ok(Self::email(s));
        }
        Ok(Self::login(s))
    }

    pub fn route_vars(&self) -> Result<RouteVars> {
        Ok(RouteVars::from([(
            PERSON_SPEC_VAR.to_string(),
            self.path_component()?,
        )]))
    }

    pub fn from_route_vars(vars: &RouteVars) -> Result<Self> {
        let raw = vars
            .get(PERSON_SPEC_VAR)
            .ok_or_else(|| Error::missing_route_var("person", PERSON_SPEC_VAR))?;
        Self::parse(raw)
    }
}

impl FromStr for PersonSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PersonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_component() {
            Ok(component) => f.write_str(&component),
            Err(_) => f.write_str("<empty>"),
        }
    }
}

/// Addresses a GitHub user by login
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GitHubUserSpec {
    pub login: String,
}

impl GitHubUserSpec {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }

    pub fn route_vars(&self) -> RouteVars {
        RouteVars::from([(GITHUB_USER_SPEC_VAR.to_string(), self.login.clone())])
    }

    pub fn from_route_vars(vars: &RouteVars) -> Result<Self> {
        vars.get(GITHUB_USER_SPEC_VAR)
            .map(|login| Self::new(login.clone()))
            .ok_or_else(|| Error::missing_route_var("person.from-github", GITHUB_USER_SPEC_VAR))
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Filters for listing people
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonListOptions {
    /// Case-insensitive prefix match on name or login
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name_or_login: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub direction: String,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// A person whose code is used by some client, with usage details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AugmentedPersonUsageByClient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

/// A person who uses some author's code, with usage details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AugmentedPersonUsageOfAuthor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<User>,
}

// ============================================================================
// Stats
// ============================================================================

/// Kinds of per-person statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonStatType {
    Authors,
    Clients,
    OwnedRepos,
    ContributedToRepos,
    Dependencies,
    Dependents,
    Defs,
    ExportedDefs,
}

/// Statistics computed for a person
pub type PersonStats = HashMap<PersonStatType, i64>;

//! Path templates with named variables
//!
//! A template is literal text interleaved with `{Name}` or `{Name:regex}`
//! variables, e.g. `/builds/{BID:[0-9]+}`. Braces inside a variable's regex
//! must be balanced. A variable without an explicit regex matches `[^/]+`.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Variables extracted from, or substituted into, a path.
///
/// Path variables are strings by nature; typed specs convert to and from
/// this map at the edges.
pub type RouteVars = BTreeMap<String, String>;

/// Regex used for variables declared without one
const DEFAULT_VAR_PATTERN: &str = "[^/]+";

/// Valid variable names (also used as regex capture group names)
static VAR_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Var {
        name: String,
        pattern: String,
        /// Anchored form of `pattern`, used to validate values at build time
        anchored: Regex,
    },
}

/// A compiled path template
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
    regex: Regex,
}

impl PathPattern {
    /// Parse and compile a template
    pub fn parse(template: &str) -> Result<Self> {
        let segments = split_template(template)?;

        let mut source = String::from("^");
        let mut seen = Vec::new();
        for segment in &segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Var { name, pattern, .. } => {
                    if seen.contains(&name) {
                        return Err(Error::route_pattern(
                            template,
                            format!("duplicate variable '{name}'"),
                        ));
                    }
                    seen.push(name);
                    source.push_str(&format!("(?P<{name}>{pattern})"));
                }
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| Error::route_pattern(template, e.to_string()))?;

        Ok(Self {
            template: template.to_string(),
            segments,
            regex,
        })
    }

    /// The template this pattern was compiled from
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Names of the variables, in template order
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template declares a variable with this name
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables().any(|v| v == name)
    }

    /// Match a whole path, returning every declared variable.
    ///
    /// An optional variable that matched nothing is returned as `""`.
    pub fn captures(&self, path: &str) -> Option<RouteVars> {
        let caps = self.regex.captures(path)?;
        Some(
            self.variables()
                .map(|name| {
                    let value = caps.name(name).map_or("", |m| m.as_str());
                    (name.to_string(), value.to_string())
                })
                .collect(),
        )
    }

    /// Substitute variables into the template.
    ///
    /// Every variable must be present and must match its own regex.
    pub fn build(&self, vars: &RouteVars) -> Result<String> {
        let mut path = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Var {
                    name,
                    pattern,
                    anchored,
                } => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| Error::missing_route_var(&self.template, name))?;
                    if !anchored.is_match(value) {
                        return Err(Error::InvalidRouteVar {
                            variable: name.clone(),
                            value: value.clone(),
                            expected: pattern.clone(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

/// Split a template into literal and variable segments
fn split_template(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' => {
                let mut depth = 1;
                let mut end = None;
                for (i, c) in chars.by_ref() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = Some(i);
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                let end = end.ok_or_else(|| Error::route_pattern(template, "unbalanced braces"))?;

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(parse_var(template, &template[start + 1..end])?);
            }
            '}' => return Err(Error::route_pattern(template, "unbalanced braces")),
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Parse the inside of a `{...}` variable
fn parse_var(template: &str, body: &str) -> Result<Segment> {
    let (name, pattern) = match body.split_once(':') {
        Some((name, pattern)) => (name, pattern),
        None => (body, DEFAULT_VAR_PATTERN),
    };

    if !VAR_NAME_REGEX.is_match(name) {
        return Err(Error::route_pattern(
            template,
            format!("invalid variable name '{name}'"),
        ));
    }
    if pattern.is_empty() {
        return Err(Error::route_pattern(
            template,
            format!("empty pattern for variable '{name}'"),
        ));
    }

    let anchored = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| Error::route_pattern(template, e.to_string()))?;
    if anchored.captures_len() > 1 {
        return Err(Error::route_pattern(
            template,
            format!("variable '{name}' must use non-capturing groups"),
        ));
    }

    Ok(Segment::Var {
        name: name.to_string(),
        pattern: pattern.to_string(),
        anchored,
    })
}

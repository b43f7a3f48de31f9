//! Excluded Path Value Objects
//!
//! Paths that bypass the request gate. Patterns are parsed once when the
//! configuration is loaded; a malformed pattern is a startup error rather
//! than a silently ignored entry.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPathPattern {
    #[error("excluded path pattern is empty")]
    Empty,

    #[error("excluded path pattern `{0}` may only use `*` as its final character")]
    MisplacedWildcard(String),
}

/// One excluded path
///
/// Trailing `/` is not significant. A pattern ending in `*` matches every
/// path that starts with the text before the `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Prefix(String),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        match self {
            PathPattern::Exact(p) => path == p,
            PathPattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

impl FromStr for PathPattern {
    type Err = InvalidPathPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidPathPattern::Empty);
        }

        let stripped = s.trim_end_matches('/');
        match stripped.find('*') {
            None => Ok(PathPattern::Exact(stripped.to_string())),
            Some(i) if i == stripped.len() - 1 => {
                Ok(PathPattern::Prefix(stripped[..i].to_string()))
            }
            Some(_) => Err(InvalidPathPattern::MisplacedWildcard(s.to_string())),
        }
    }
}

/// Ordered list of [`PathPattern`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedPaths(Vec<PathPattern>);

impl ExcludedPaths {
    pub fn new(patterns: Vec<PathPattern>) -> Self {
        Self(patterns)
    }

    /// Parse a comma separated list, ignoring blank entries
    pub fn parse_list(list: &str) -> Result<Self, InvalidPathPattern> {
        list.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// `false` only when `path` matches one of the patterns
    ///
    /// A missing path or an empty list always requires authentication.
    pub fn requires_auth(&self, path: Option<&str>) -> bool {
        let Some(path) = path else {
            return true;
        };
        !self.0.iter().any(|pattern| pattern.matches(path))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.0
    }
}

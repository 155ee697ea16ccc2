//! Path matching for console routes.

use std::sync::Arc;

use tracing::debug;

use crate::ConsoleError;
use crate::route::{RouteDef, RouteParams};

/// How a route matches a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one path exactly.
    Exact(String),
    /// Matches any path starting with the prefix and captures the whole
    /// remainder, percent-decoded, as the wildcard. Separators in the
    /// remainder are kept, so `/secrets/a/b` captures `a/b`.
    Rest(String),
}

impl RoutePattern {
    pub fn exact(path: impl Into<String>) -> Self {
        RoutePattern::Exact(path.into())
    }

    pub fn rest(prefix: impl Into<String>) -> Self {
        RoutePattern::Rest(prefix.into())
    }

    /// Match a normalised path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Result<Option<RouteParams>, ConsoleError> {
        match self {
            RoutePattern::Exact(exact) => Ok((path == exact.as_str()).then(RouteParams::new)),
            RoutePattern::Rest(prefix) => {
                let Some(rest) = path.strip_prefix(prefix.as_str()) else {
                    return Ok(None);
                };
                if rest.is_empty() {
                    return Ok(None);
                }
                let decoded = urlencoding::decode(rest).map_err(|_| ConsoleError::InvalidPath {
                    path: path.to_string(),
                })?;
                if decoded.is_empty() {
                    return Ok(None);
                }
                Ok(Some(RouteParams::with_wildcard(decoded.into_owned())))
            }
        }
    }
}

/// A route selected for a location.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteDef>,
    pub params: RouteParams,
    /// The normalised path that matched.
    pub path: String,
}

/// Ordered set of routes; the first matching route wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Arc<RouteDef>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, def: RouteDef) -> Self {
        self.routes.push(Arc::new(def));
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the route for a location (path with optional query or fragment).
    pub fn resolve(&self, location: &str) -> Result<RouteMatch, ConsoleError> {
        let path = normalize_path(location);

        for route in &self.routes {
            if let Some(params) = route.pattern.matches(&path)? {
                debug!(path = %path, pattern = ?route.pattern, "matched route");
                return Ok(RouteMatch {
                    route: Arc::clone(route),
                    params,
                    path,
                });
            }
        }

        Err(ConsoleError::NoRoute { path })
    }
}

/// Strip query and fragment, ensure a leading slash and drop one trailing slash.
fn normalize_path(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or("");
    let mut path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

//! Client route table
//!
//! Two static routes: the library browser at `/` and the settings page at
//! `/settings`. Matching follows the history router's defaults: trailing
//! slashes are optional and paths compare case-insensitively.

use std::fmt;
use url::Url;

/// Top-level client views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Library,
    Settings,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One path-to-view mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub view: View,
}

/// Ordered route table; the first match wins
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: vec![
                Route {
                    path: "/",
                    view: View::Library,
                },
                Route {
                    path: "/settings",
                    view: View::Settings,
                },
            ],
        }
    }
}

impl RouteTable {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a location (path or absolute URL) to a view
    pub fn resolve(&self, location: &str) -> Option<View> {
        let path = normalize(location);
        self.routes
            .iter()
            .find(|r| r.path.eq_ignore_ascii_case(&path))
            .map(|r| r.view)
    }

    /// Canonical path of a view
    pub fn path_for(&self, view: View) -> Option<&'static str> {
        self.routes.iter().find(|r| r.view == view).map(|r| r.path)
    }
}

/// Reduce a location to a bare path: no origin, query, fragment or trailing slash
fn normalize(location: &str) -> String {
    let location = location.trim();
    let path = match Url::parse(location) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

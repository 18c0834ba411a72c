//! Client-side router.
//!
//! Resolves navigation targets against the history base URL, matches them
//! against the static [`RouteTable`], and runs every registered
//! [`NavigationGuard`] before committing the change.

pub mod guard;
pub mod routes;

use thiserror::Error;
use url::Url;

pub use guard::{ACCESS_DENIED_NOTICE, AdminGuard, GuardDecision, NavigationGuard};
pub use routes::{Route, RouteMeta, RouteTable, View};

/// Redirect hops allowed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 10;

/// Errors that stop a navigation. The current route is left unchanged.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The target could not be parsed as a URL reference.
    #[error("invalid navigation target {target}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    /// The target resolves to another origin or outside the history base.
    #[error("navigation target is outside the application: {0}")]
    OutsideBase(String),

    /// No route matches the resolved path.
    #[error("no route matches {0}")]
    NotFound(String),

    /// Guards kept redirecting.
    #[error("too many redirects navigating to {0}")]
    RedirectLoop(String),
}

/// A committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Route that was entered.
    pub route: Route,
    /// Application path that matched, relative to the history base.
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
    /// Path originally requested when a guard redirected.
    pub redirected_from: Option<String>,
    /// Message for the user, set when a guard turned them away.
    pub notice: Option<String>,
}

impl Navigation {
    /// Whether a guard sent the user somewhere other than requested.
    #[must_use]
    pub const fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Resolved pieces of a navigation target.
struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

/// Router with a route table, history stack and guards.
pub struct Router {
    base: Url,
    table: RouteTable,
    guards: Vec<Box<dyn NavigationGuard>>,
    history: Vec<Route>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("base", &self.base.as_str())
            .field("table", &self.table)
            .field("guards", &self.guards.len())
            .field("history", &self.history)
            .finish()
    }
}

impl Router {
    /// Create a router rooted at `base`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://shop.example/app` and `https://shop.example/app/` are the same.
    #[must_use]
    pub fn new(mut base: Url, table: RouteTable) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Self {
            base,
            table,
            guards: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Register a guard. Guards run in registration order.
    pub fn before_each(&mut self, guard: impl NavigationGuard + 'static) {
        self.guards.push(Box::new(guard));
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Route currently displayed, if any navigation has happened.
    #[must_use]
    pub fn current(&self) -> Option<&Route> {
        self.history.last()
    }

    /// Routes visited, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Navigate to `target`, an application path such as `/sweets?page=2`.
    ///
    /// Guards may redirect; the redirect target is guarded again. A redirect
    /// is reported on the returned [`Navigation`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the target is malformed, leaves the
    /// application, matches no route, or redirects more than
    /// [`MAX_REDIRECTS`] times.
    pub fn navigate(&mut self, target: &str) -> Result<Navigation, NavigationError> {
        let mut target = target.to_string();
        let mut redirected_from = None;
        let mut notice = None;

        for _ in 0..=MAX_REDIRECTS {
            let location = self.resolve(&target)?;
            let route = *self
                .table
                .match_path(&location.path)
                .ok_or_else(|| NavigationError::NotFound(location.path.clone()))?;

            match self.run_guards(&route) {
                GuardDecision::Proceed => {
                    tracing::debug!(route = route.name, path = %location.path, "Navigated");
                    self.history.push(route);
                    return Ok(Navigation {
                        route,
                        path: location.path,
                        query: location.query,
                        fragment: location.fragment,
                        redirected_from,
                        notice,
                    });
                }
                GuardDecision::Redirect { to, notice: reason } => {
                    tracing::debug!(from = %location.path, to = %to, "Navigation redirected");
                    redirected_from.get_or_insert(location.path);
                    if notice.is_none() {
                        notice = reason;
                    }
                    target = to;
                }
            }
        }

        Err(NavigationError::RedirectLoop(
            redirected_from.unwrap_or(target),
        ))
    }

    /// Go back one entry without re-running guards.
    ///
    /// Returns the route now current, or `None` when there is nothing to go
    /// back to (the current route is kept).
    pub fn back(&mut self) -> Option<&Route> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        self.history.last()
    }

    fn run_guards(&self, to: &Route) -> GuardDecision {
        let from = self.current();
        for guard in &self.guards {
            let decision = guard.before_each(to, from);
            if decision != GuardDecision::Proceed {
                return decision;
            }
        }
        GuardDecision::Proceed
    }

    /// Resolve `target` against the history base and strip the base path.
    fn resolve(&self, target: &str) -> Result<Location, NavigationError> {
        // Absolute app paths are relative to the base, not the origin root.
        let relative = target.strip_prefix('/').unwrap_or(target);
        let url = self
            .base
            .join(relative)
            .map_err(|source| NavigationError::InvalidTarget {
                target: target.to_string(),
                source,
            })?;

        if url.origin() != self.base.origin() {
            return Err(NavigationError::OutsideBase(target.to_string()));
        }

        let base_path = self.base.path().trim_end_matches('/');
        let path = url
            .path()
            .strip_prefix(base_path)
            .filter(|rest| rest.starts_with('/'))
            .ok_or_else(|| NavigationError::OutsideBase(target.to_string()))?;

        Ok(Location {
            path: path.to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        })
    }
}

//! Static route table.
//!
//! # Routes
//!
//! ```text
//! /               home          HomeView
//! /login          login         LoginView
//! /register       register      RegisterView
//! /sweets         sweets        SweetsView
//! /admin/sweets   admin-sweets  AdminSweetsView   (requires admin)
//! ```

use std::fmt;

/// Presentation component a route renders. Rendering happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    Sweets,
    AdminSweets,
}

impl View {
    /// Component name as the UI layer knows it.
    #[must_use]
    pub const fn component(&self) -> &'static str {
        match self {
            Self::Home => "HomeView",
            Self::Login => "LoginView",
            Self::Register => "RegisterView",
            Self::Sweets => "SweetsView",
            Self::AdminSweets => "AdminSweetsView",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.component())
    }
}

/// Per-route metadata read by navigation guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// Only admin users may enter.
    pub requires_admin: bool,
}

/// A single entry in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub meta: RouteMeta,
}

impl Route {
    const fn new(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name,
            view,
            meta: RouteMeta {
                requires_admin: false,
            },
        }
    }

    const fn admin_only(mut self) -> Self {
        self.meta.requires_admin = true;
        self
    }

    /// Whether `path` (no query or fragment) selects this route.
    ///
    /// Matching ignores ASCII case and a single trailing slash.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        normalize(path).eq_ignore_ascii_case(self.path)
    }
}

/// Strip a trailing slash, keeping the root as `/`.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    }
}

pub const HOME: Route = Route::new("/", "home", View::Home);
pub const LOGIN: Route = Route::new("/login", "login", View::Login);
pub const REGISTER: Route = Route::new("/register", "register", View::Register);
pub const SWEETS: Route = Route::new("/sweets", "sweets", View::Sweets);
pub const ADMIN_SWEETS: Route =
    Route::new("/admin/sweets", "admin-sweets", View::AdminSweets).admin_only();

/// Immutable set of routes, matched in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The application's five routes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            routes: vec![HOME, LOGIN, REGISTER, SWEETS, ADMIN_SWEETS],
        }
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route whose path matches.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Route registered under `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = RouteTable::standard();
        let paths: Vec<&str> = table.routes().iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/", "/login", "/register", "/sweets", "/admin/sweets"]
        );

        let admin: Vec<&str> = table
            .routes()
            .iter()
            .filter(|r| r.meta.requires_admin)
            .map(|r| r.name)
            .collect();
        assert_eq!(admin, vec!["admin-sweets"]);
    }

    #[test]
    fn test_match_path_is_lenient_like_browser_router() {
        let table = RouteTable::standard();
        assert_eq!(table.match_path("/sweets").map(|r| r.view), Some(View::Sweets));
        assert_eq!(table.match_path("/sweets/").map(|r| r.view), Some(View::Sweets));
        assert_eq!(
            table.match_path("/Admin/Sweets").map(|r| r.view),
            Some(View::AdminSweets)
        );
        assert_eq!(table.match_path("/").map(|r| r.view), Some(View::Home));
        assert!(table.match_path("/sweets/12").is_none());
        assert!(table.match_path("/admin").is_none());
        assert!(table.match_path("").is_none());
    }

    #[test]
    fn test_by_name() {
        let table = RouteTable::standard();
        assert_eq!(table.by_name("login"), Some(&LOGIN));
        assert!(table.by_name("checkout").is_none());
    }

    #[test]
    fn test_view_component_names() {
        assert_eq!(View::AdminSweets.to_string(), "AdminSweetsView");
        assert_eq!(HOME.view.component(), "HomeView");
    }
}

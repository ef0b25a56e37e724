//! Routing Surface
//!
//! Typed path parsing for the app's routes and the auth guard that keeps
//! signed-out visitors on the public pages and signed-in users off them.

use std::sync::OnceLock;

use regex::{Regex, RegexSet};

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The application's route space
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    Dashboard,
    /// Project page; the segment selects the project id
    Project(String),
    /// Retro board page; the segment selects the board id
    Retro(String),
}

impl Route {
    /// Parse a path into a known route
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(Route::Home);
        }
        match path {
            "/sign-in" => return Some(Route::SignIn),
            "/sign-up" => return Some(Route::SignUp),
            "/dashboard" => return Some(Route::Dashboard),
            _ => {}
        }
        static SEGMENT: OnceLock<Regex> = OnceLock::new();
        let segment = SEGMENT.get_or_init(|| {
            Regex::new(r"^/(projects|retro)/([^/]+)$").expect("route pattern compiles")
        });
        let caps = segment.captures(path)?;
        let id = caps[2].to_string();
        match &caps[1] {
            "projects" => Some(Route::Project(id)),
            "retro" => Some(Route::Retro(id)),
            _ => None,
        }
    }
}

/// What the guard decided to do with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through
    Next,
    /// Signed-out user on a protected path
    RedirectToSignIn,
    /// Signed-in user on a public-only path
    RedirectToDashboard,
}

/// Matches the public (no-auth) portion of the route space
pub struct RouteMatcher {
    public: RegexSet,
}

impl RouteMatcher {
    pub fn new() -> Self {
        let public = RegexSet::new([r"^/$", r"^/sign-in(.*)$", r"^/sign-up(.*)$"])
            .expect("route patterns compile");
        Self { public }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.is_match(path)
    }

    /// The route guard: public paths pass for signed-out users and bounce
    /// signed-in users to the dashboard; protected paths bounce signed-out
    /// users to sign-in.
    pub fn guard(&self, path: &str, authenticated: bool) -> RouteDecision {
        let public = self.is_public(path);
        if !authenticated && public {
            return RouteDecision::Next;
        }
        if authenticated && public {
            return RouteDecision::RedirectToDashboard;
        }
        if !authenticated {
            return RouteDecision::RedirectToSignIn;
        }
        RouteDecision::Next
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/sign-in"), Some(Route::SignIn));
        assert_eq!(Route::parse("/dashboard"), Some(Route::Dashboard));
        assert_eq!(
            Route::parse("/projects/abc-123"),
            Some(Route::Project("abc-123".to_string()))
        );
        assert_eq!(
            Route::parse("/retro/99/"),
            Some(Route::Retro("99".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/projects"), None);
        assert_eq!(Route::parse("/projects/1/settings"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn test_guard_matrix() {
        let matcher = RouteMatcher::new();
        assert_eq!(matcher.guard("/", false), RouteDecision::Next);
        assert_eq!(matcher.guard("/sign-in", false), RouteDecision::Next);
        assert_eq!(matcher.guard("/", true), RouteDecision::RedirectToDashboard);
        assert_eq!(
            matcher.guard("/sign-up/verify", true),
            RouteDecision::RedirectToDashboard
        );
        assert_eq!(
            matcher.guard("/dashboard", false),
            RouteDecision::RedirectToSignIn
        );
        assert_eq!(
            matcher.guard("/projects/p1", false),
            RouteDecision::RedirectToSignIn
        );
        assert_eq!(matcher.guard("/projects/p1", true), RouteDecision::Next);
        assert_eq!(matcher.guard("/retro/1", true), RouteDecision::Next);
    }
}

//! Route access decisions.
//!
//! A stateless, per-request decision over the request path and an optional
//! session. Finding no session token is the normal logged-out case, never
//! an error; the outcome is always a plain allow-or-redirect.

use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Paths reachable without a session
static DEFAULT_PUBLIC_PATHS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "/",
        "/login",
        "/register",
        "/verify-otp",
        "/forgot-password",
        "/about",
        "/terms",
        "/privacy",
    ]
    .into_iter()
    .collect()
});

/// Role carried by a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Member,
    Admin,
}

/// An authenticated session, as far as routing is concerned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
}

impl Session {
    pub fn member() -> Self {
        Self { role: Role::Member }
    }

    pub fn admin() -> Self {
        Self { role: Role::Admin }
    }
}

/// Outcome of a route decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Route-guard configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Login page; unauthenticated requests are sent here with a
    /// `redirect` query carrying the original path
    pub login_path: String,
    /// Default authenticated landing page
    pub landing_path: String,
    /// Prefix of paths requiring the admin role
    pub admin_prefix: String,
    /// Paths reachable without a session
    pub public_paths: FxHashSet<&'static str>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            landing_path: "/dashboard".to_string(),
            admin_prefix: "/admin".to_string(),
            public_paths: DEFAULT_PUBLIC_PATHS.clone(),
        }
    }
}

impl GuardConfig {
    /// Decides how to route a request for `path` under this configuration
    pub fn decide(&self, path: &str, session: Option<&Session>) -> RouteDecision {
        let is_auth_page = path == self.login_path || path == "/register";

        match session {
            Some(session) => {
                if is_auth_page {
                    return RouteDecision::Redirect(self.landing_path.clone());
                }
                if path.starts_with(&self.admin_prefix) && session.role != Role::Admin {
                    return RouteDecision::Redirect(self.landing_path.clone());
                }
                RouteDecision::Allow
            }
            None => {
                if self.public_paths.contains(path) {
                    return RouteDecision::Allow;
                }
                RouteDecision::Redirect(format!("{}?redirect={}", self.login_path, path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_is_redirected_with_return_target() {
        let guard = GuardConfig::default();
        assert_eq!(
            guard.decide("/dashboard", None),
            RouteDecision::Redirect("/login?redirect=/dashboard".to_string())
        );
    }

    #[test]
    fn test_logged_out_reaches_public_pages() {
        let guard = GuardConfig::default();
        assert_eq!(guard.decide("/", None), RouteDecision::Allow);
        assert_eq!(guard.decide("/login", None), RouteDecision::Allow);
        assert_eq!(guard.decide("/terms", None), RouteDecision::Allow);
    }

    #[test]
    fn test_non_admin_is_bounced_from_admin_paths() {
        let guard = GuardConfig::default();
        let member = Session::member();
        assert_eq!(
            guard.decide("/admin/x", Some(&member)),
            RouteDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(
            guard.decide("/admin/x", Some(&Session::admin())),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_authenticated_user_skips_auth_pages() {
        let guard = GuardConfig::default();
        let member = Session::member();
        assert_eq!(
            guard.decide("/login", Some(&member)),
            RouteDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(
            guard.decide("/register", Some(&member)),
            RouteDecision::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn test_authenticated_user_reaches_member_pages() {
        let guard = GuardConfig::default();
        assert_eq!(
            guard.decide("/dashboard", Some(&Session::member())),
            RouteDecision::Allow
        );
    }
}

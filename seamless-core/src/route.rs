//! Route classification for the decision engine.
//!
//! The engine only cares about a handful of logical routes: the front page,
//! login, logout, and the identity-provider return callback. Everything else
//! collapses to [`RouteKind::Other`]. The callback path is a configuration
//! value ([`EngineConfig::return_callback_path`](crate::EngineConfig)) so that
//! it and the marker cookie name travel together as one configured pair.

use crate::config::EngineConfig;
use crate::error::SsoResult;
use serde::{Deserialize, Serialize};

/// Logical classification of the matched route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Front page
    Home,
    /// Local login form
    Login,
    /// Local logout endpoint
    Logout,
    /// Return leg of the identity-provider redirect
    IdpReturnCallback,
    /// Any other route
    Other,
}

impl RouteKind {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Home => "home",
            RouteKind::Login => "login",
            RouteKind::Logout => "logout",
            RouteKind::IdpReturnCallback => "idp_return_callback",
            RouteKind::Other => "other",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "home" => Some(RouteKind::Home),
            "login" => Some(RouteKind::Login),
            "logout" => Some(RouteKind::Logout),
            "idp_return_callback" | "callback" => Some(RouteKind::IdpReturnCallback),
            "other" => Some(RouteKind::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for route resolution implementations.
///
/// A resolver maps a request path to its [`RouteKind`]. Implementations that
/// consult an external routing system may fail; callers treat a failure as
/// [`RouteKind::Other`] rather than blocking the request.
pub trait RouteResolver: Send + Sync {
    /// Classify a request path.
    fn resolve(&self, path: &str, config: &EngineConfig) -> SsoResult<RouteKind>;

    /// Destination of the local logout endpoint, used by the forced-logout
    /// redirect.
    fn logout_destination(&self) -> String;
}

/// Path-based route table.
///
/// Matches the login/logout/home paths exactly (tolerating a trailing slash)
/// and the identity-provider callback by prefix, since the provider appends
/// its own response segments and query parameters to the return URL.
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Front page path
    pub home: String,
    /// Local login form path
    pub login: String,
    /// Local logout endpoint path
    pub logout: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/user/login".to_string(),
            logout: "/user/logout".to_string(),
        }
    }
}

/// Strip a trailing slash so `/user/logout/` and `/user/logout` compare equal.
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

impl RouteTable {
    fn is_callback(path: &str, config: &EngineConfig) -> bool {
        let callback = normalize(&config.return_callback_path);
        let path = normalize(path);
        path == callback || path.starts_with(&format!("{callback}/"))
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, path: &str, config: &EngineConfig) -> SsoResult<RouteKind> {
        if Self::is_callback(path, config) {
            return Ok(RouteKind::IdpReturnCallback);
        }
        let path = normalize(path);
        if path == normalize(&self.logout) {
            return Ok(RouteKind::Logout);
        }
        if path == normalize(&self.login) {
            return Ok(RouteKind::Login);
        }
        if path == normalize(&self.home) {
            return Ok(RouteKind::Home);
        }
        Ok(RouteKind::Other)
    }

    fn logout_destination(&self) -> String {
        self.logout.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_kind_conversion() {
        assert_eq!(RouteKind::Logout.as_str(), "logout");
        assert_eq!(RouteKind::IdpReturnCallback.as_str(), "idp_return_callback");

        assert_eq!(RouteKind::parse("logout"), Some(RouteKind::Logout));
        assert_eq!(RouteKind::parse("LOGIN"), Some(RouteKind::Login));
        assert_eq!(
            RouteKind::parse("callback"),
            Some(RouteKind::IdpReturnCallback)
        );
        assert_eq!(RouteKind::parse("nope"), None);
    }

    #[test]
    fn test_resolve_known_routes() {
        let table = RouteTable::default();
        let config = EngineConfig::default();

        assert_eq!(table.resolve("/", &config).unwrap(), RouteKind::Home);
        assert_eq!(
            table.resolve("/user/login", &config).unwrap(),
            RouteKind::Login
        );
        assert_eq!(
            table.resolve("/user/logout", &config).unwrap(),
            RouteKind::Logout
        );
        assert_eq!(
            table.resolve("/user/logout/", &config).unwrap(),
            RouteKind::Logout
        );
    }

    #[test]
    fn test_resolve_callback_by_prefix() {
        let table = RouteTable::default();
        let config = EngineConfig::default();

        assert_eq!(
            table
                .resolve(&config.return_callback_path, &config)
                .unwrap(),
            RouteKind::IdpReturnCallback
        );
        let nested = format!("{}/code", config.return_callback_path);
        assert_eq!(
            table.resolve(&nested, &config).unwrap(),
            RouteKind::IdpReturnCallback
        );
    }

    #[test]
    fn test_resolve_other() {
        let table = RouteTable::default();
        let config = EngineConfig::default();

        assert_eq!(
            table.resolve("/docs/getting-started", &config).unwrap(),
            RouteKind::Other
        );
        assert_eq!(table.resolve("/user", &config).unwrap(), RouteKind::Other);
    }

    #[test]
    fn test_callback_path_is_configurable() {
        let table = RouteTable::default();
        let config = EngineConfig {
            return_callback_path: "/cilogon-auth".to_string(),
            ..EngineConfig::default()
        };

        assert_eq!(
            table.resolve("/cilogon-auth", &config).unwrap(),
            RouteKind::IdpReturnCallback
        );
        assert_eq!(
            table.resolve("/auth/return", &config).unwrap(),
            RouteKind::Other
        );
    }

    #[test]
    fn test_logout_destination() {
        let table = RouteTable::default();
        assert_eq!(table.logout_destination(), "/user/logout");
    }
}

//! The per-request SSO decision engine.
//!
//! [`DecisionEngine::decide`] maps one [`RequestContext`] to one [`Action`].
//! It performs no I/O and never fails; every request is evaluated
//! independently against the ordered rule table below. The marker cookie is
//! the source of truth for "this browser has been through the seamless
//! flow": an authenticated session without it means the visitor logged out
//! on a sibling site, and an anonymous visitor with it gets carried through
//! the identity provider without a login click.
//!
//! Rule order matters: the callback and logout routes are handled before the
//! general authenticated/anonymous branches so the cookie-mutating routes
//! never trigger a second, conflicting action.

use crate::config::EngineConfig;
use crate::context::RequestContext;
use crate::route::RouteKind;

/// The engine's sole output: exactly one action per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Forward to the next handler unchanged
    PassThrough,

    /// Mint the marker cookie and redirect back to the requested destination
    SetMarkerCookie {
        /// Where to send the visitor after the cookie-setting redirect
        destination: String,
    },

    /// Expire the marker cookie and redirect to the identity provider's
    /// logout endpoint
    DeleteMarkerCookie {
        /// Identity-provider logout endpoint
        redirect_to: String,
    },

    /// Redirect to the local logout endpoint; the session exists but the
    /// marker cookie is gone
    ForceLogoutRedirect,

    /// Delegate to the identity provider's authorize operation
    RedirectToIdentityProvider {
        /// Scopes to request from the provider
        scopes: Vec<String>,
        /// Original request URI to return to after the provider round-trip
        return_destination: String,
    },
}

impl Action {
    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PassThrough => "pass_through",
            Action::SetMarkerCookie { .. } => "set_marker_cookie",
            Action::DeleteMarkerCookie { .. } => "delete_marker_cookie",
            Action::ForceLogoutRedirect => "force_logout_redirect",
            Action::RedirectToIdentityProvider { .. } => "redirect_to_identity_provider",
        }
    }
}

/// The stateless per-request decision engine.
///
/// The requested scopes and the provider's logout endpoint come from the
/// identity-provider collaborator once, at construction; per-request
/// evaluation is then a pure function of `(config, context)`.
///
/// # Examples
///
/// ```
/// use seamless_core::{Action, DecisionEngine, EngineConfig, RequestContext, RouteKind};
///
/// let engine = DecisionEngine::new(
///     vec!["openid".to_string(), "email".to_string()],
///     "https://idp.example.org/logout",
/// );
/// let config = EngineConfig::default();
/// let ctx = RequestContext::new(false, None, RouteKind::Other, true, true, "/projects");
///
/// match engine.decide(&config, &ctx) {
///     Action::RedirectToIdentityProvider { return_destination, .. } => {
///         assert_eq!(return_destination, "/projects");
///     }
///     other => panic!("expected provider redirect, got {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    scopes: Vec<String>,
    idp_logout_url: String,
}

impl DecisionEngine {
    /// Create an engine for one identity provider.
    pub fn new(scopes: Vec<String>, idp_logout_url: impl Into<String>) -> Self {
        Self {
            scopes,
            idp_logout_url: idp_logout_url.into(),
        }
    }

    /// Map a request context to the single action to take.
    ///
    /// First matching rule wins; the order is load-bearing.
    pub fn decide(&self, config: &EngineConfig, ctx: &RequestContext) -> Action {
        // Disabled must never block reaching the admin surface.
        if !config.enabled {
            return Action::PassThrough;
        }
        if !ctx.domain_eligible {
            return Action::PassThrough;
        }

        match ctx.route {
            // Back from the provider: mint the marker unless it is already
            // there, then replay the original destination.
            RouteKind::IdpReturnCallback => {
                if !ctx.marker_cookie_present {
                    return Action::SetMarkerCookie {
                        destination: ctx.requested_uri.clone(),
                    };
                }
                return Action::PassThrough;
            }
            // Logging out here logs out the whole family: drop the marker and
            // finish at the provider's logout endpoint.
            RouteKind::Logout => {
                if ctx.marker_cookie_present {
                    return Action::DeleteMarkerCookie {
                        redirect_to: self.idp_logout_url.clone(),
                    };
                }
                return Action::PassThrough;
            }
            _ => {}
        }

        if ctx.is_authenticated {
            let exempt = ctx
                .account
                .as_deref()
                .is_some_and(|account| config.is_exempt(account));
            if !ctx.marker_cookie_present
                && !matches!(ctx.route, RouteKind::Logout | RouteKind::Login)
                && !exempt
            {
                return Action::ForceLogoutRedirect;
            }
            return Action::PassThrough;
        }

        if ctx.marker_cookie_present {
            return Action::RedirectToIdentityProvider {
                scopes: self.scopes.clone(),
                return_destination: ctx.requested_uri.clone(),
            };
        }

        Action::PassThrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DecisionEngine {
        DecisionEngine::new(
            vec!["openid".to_string(), "email".to_string()],
            "https://idp.example.org/logout",
        )
    }

    fn ctx(
        authenticated: bool,
        route: RouteKind,
        cookie: bool,
        eligible: bool,
    ) -> RequestContext {
        RequestContext::new(authenticated, None, route, cookie, eligible, "/projects/42")
    }

    #[test]
    fn test_disabled_always_passes_through() {
        let mut config = EngineConfig::default();
        config.enabled = false;

        for authenticated in [false, true] {
            for cookie in [false, true] {
                for route in [
                    RouteKind::Home,
                    RouteKind::Login,
                    RouteKind::Logout,
                    RouteKind::IdpReturnCallback,
                    RouteKind::Other,
                ] {
                    assert_eq!(
                        engine().decide(&config, &ctx(authenticated, route, cookie, true)),
                        Action::PassThrough,
                        "disabled engine acted for route {route}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_ineligible_domain_always_passes_through() {
        let config = EngineConfig::default();

        for authenticated in [false, true] {
            for cookie in [false, true] {
                for route in [
                    RouteKind::Logout,
                    RouteKind::IdpReturnCallback,
                    RouteKind::Other,
                ] {
                    assert_eq!(
                        engine().decide(&config, &ctx(authenticated, route, cookie, false)),
                        Action::PassThrough
                    );
                }
            }
        }
    }

    #[test]
    fn test_callback_without_cookie_mints_marker() {
        let config = EngineConfig::default();
        let action = engine().decide(
            &config,
            &ctx(false, RouteKind::IdpReturnCallback, false, true),
        );
        assert_eq!(
            action,
            Action::SetMarkerCookie {
                destination: "/projects/42".to_string()
            }
        );
    }

    #[test]
    fn test_callback_with_cookie_is_idempotent() {
        // Re-evaluating the callback with the cookie now present must not
        // set it again, or the redirect would loop.
        let config = EngineConfig::default();
        let action = engine().decide(
            &config,
            &ctx(false, RouteKind::IdpReturnCallback, true, true),
        );
        assert_eq!(action, Action::PassThrough);
    }

    #[test]
    fn test_logout_with_cookie_deletes_marker() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(true, RouteKind::Logout, true, true));
        assert_eq!(
            action,
            Action::DeleteMarkerCookie {
                redirect_to: "https://idp.example.org/logout".to_string()
            }
        );
    }

    #[test]
    fn test_logout_without_cookie_passes_through() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(true, RouteKind::Logout, false, true));
        assert_eq!(action, Action::PassThrough);
    }

    #[test]
    fn test_authenticated_with_cookie_passes_through() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(true, RouteKind::Other, true, true));
        assert_eq!(action, Action::PassThrough);
    }

    #[test]
    fn test_authenticated_without_cookie_forces_logout() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(true, RouteKind::Other, false, true));
        assert_eq!(action, Action::ForceLogoutRedirect);
    }

    #[test]
    fn test_login_route_never_forces_logout() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(true, RouteKind::Login, false, true));
        assert_eq!(action, Action::PassThrough);
    }

    #[test]
    fn test_exempt_account_bypasses_forced_logout() {
        let mut config = EngineConfig::default();
        config.exempt_accounts.insert("ops-admin".to_string());

        let ctx = RequestContext::new(
            true,
            Some("ops-admin".to_string()),
            RouteKind::Other,
            false,
            true,
            "/admin/settings",
        );
        assert_eq!(engine().decide(&config, &ctx), Action::PassThrough);

        let other = RequestContext::new(
            true,
            Some("visitor".to_string()),
            RouteKind::Other,
            false,
            true,
            "/admin/settings",
        );
        assert_eq!(engine().decide(&config, &other), Action::ForceLogoutRedirect);
    }

    #[test]
    fn test_anonymous_with_cookie_redirects_to_provider() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(false, RouteKind::Other, true, true));
        assert_eq!(
            action,
            Action::RedirectToIdentityProvider {
                scopes: vec!["openid".to_string(), "email".to_string()],
                return_destination: "/projects/42".to_string(),
            }
        );
    }

    #[test]
    fn test_anonymous_without_cookie_passes_through() {
        let config = EngineConfig::default();
        let action = engine().decide(&config, &ctx(false, RouteKind::Other, false, true));
        assert_eq!(action, Action::PassThrough);
    }

    #[test]
    fn test_provider_round_trip_preserves_destination() {
        // Anonymous visitor with the marker is sent to the provider; on the
        // callback leg, still without a cookie on this site, the engine mints
        // the marker with the same destination.
        let config = EngineConfig::default();
        let outbound = engine().decide(
            &config,
            &RequestContext::new(false, None, RouteKind::Other, true, true, "/docs?page=2"),
        );
        let destination = match outbound {
            Action::RedirectToIdentityProvider {
                return_destination, ..
            } => return_destination,
            other => panic!("expected provider redirect, got {other:?}"),
        };

        let inbound = engine().decide(
            &config,
            &RequestContext::new(
                false,
                None,
                RouteKind::IdpReturnCallback,
                false,
                true,
                destination.clone(),
            ),
        );
        assert_eq!(inbound, Action::SetMarkerCookie { destination });
    }

    #[test]
    fn test_action_kind_tags() {
        assert_eq!(Action::PassThrough.kind(), "pass_through");
        assert_eq!(Action::ForceLogoutRedirect.kind(), "force_logout_redirect");
        assert_eq!(
            Action::SetMarkerCookie {
                destination: "/".into()
            }
            .kind(),
            "set_marker_cookie"
        );
    }
}

//! Request-context extraction.
//!
//! Normalizes the raw request plus the collaborators' answers into the
//! immutable [`RequestContext`] the engine consumes. Deterministic; no side
//! effects beyond reads. Marker presence is computed strictly from the named
//! cookie in the incoming request, using the same configured name the
//! set/delete operations use.

use crate::cookie;
use crate::session::SessionInfo;
use axum::body::Body;
use axum::http::Request;
use seamless_core::{DomainGate, EngineConfig, RequestContext, RouteKind, RouteResolver};

/// Build the context for one inbound request.
///
/// Route-resolution failures classify the request as [`RouteKind::Other`]
/// rather than propagating; the engine then takes the least intrusive branch.
pub fn build_context(
    request: &Request<Body>,
    config: &EngineConfig,
    session: &SessionInfo,
    routes: &dyn RouteResolver,
    gate: &DomainGate,
) -> RequestContext {
    let path = request.uri().path();
    let requested_uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.to_string());

    let route = match routes.resolve(path, config) {
        Ok(route) => route,
        Err(error) => {
            tracing::debug!(
                error = %error,
                path,
                "route resolution failed, classifying as other"
            );
            RouteKind::Other
        }
    };

    RequestContext::new(
        session.authenticated,
        session.account.clone(),
        route,
        cookie::marker_cookie_present(request.headers(), &config.cookie_name),
        gate.eligible(config),
        requested_uri,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use seamless_core::{RouteTable, SsoError, SsoResult};

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_build_context_basic() {
        let config = EngineConfig::default();
        let ctx = build_context(
            &request("/projects/42?tab=usage"),
            &config,
            &SessionInfo::anonymous(),
            &RouteTable::default(),
            &DomainGate::open(),
        );

        assert!(!ctx.is_authenticated);
        assert_eq!(ctx.route, RouteKind::Other);
        assert!(!ctx.marker_cookie_present);
        assert!(ctx.domain_eligible);
        assert_eq!(ctx.requested_uri, "/projects/42?tab=usage");
    }

    #[test]
    fn test_build_context_reads_marker_cookie() {
        let config = EngineConfig::default();
        let mut req = request("/");
        req.headers_mut().insert(
            COOKIE,
            format!("{}=support", config.cookie_name).parse().unwrap(),
        );

        let ctx = build_context(
            &req,
            &config,
            &SessionInfo::anonymous(),
            &RouteTable::default(),
            &DomainGate::open(),
        );
        assert!(ctx.marker_cookie_present);
        assert_eq!(ctx.route, RouteKind::Home);
    }

    #[test]
    fn test_resolution_failure_classifies_as_other() {
        struct BrokenResolver;

        impl RouteResolver for BrokenResolver {
            fn resolve(&self, _path: &str, _config: &EngineConfig) -> SsoResult<RouteKind> {
                Err(SsoError::RouteResolutionFailure("router offline".into()))
            }

            fn logout_destination(&self) -> String {
                "/user/logout".to_string()
            }
        }

        let ctx = build_context(
            &request("/user/logout"),
            &EngineConfig::default(),
            &SessionInfo::anonymous(),
            &BrokenResolver,
            &DomainGate::open(),
        );
        assert_eq!(ctx.route, RouteKind::Other);
    }
}

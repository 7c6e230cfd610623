//! Action execution against the HTTP pipeline.
//!
//! Applies the engine's chosen [`Action`] as at most one response: a 302
//! redirect with an optional cookie mutation, or nothing (pass through).
//! Every engine-issued redirect carries `Cache-Control: public, max-age=0`;
//! a shared cache serving one visitor's cookie-setting redirect to another
//! would be a correctness bug, not a performance one.
//!
//! A provider or store failure never crashes the pipeline: the error is
//! surfaced to the caller, which falls back to pass-through so the site
//! stays reachable.

use crate::cookie;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use seamless_core::{Action, EngineConfig, RouteResolver, SsoError, SsoResult};
use seamless_idp::{IdentityProviderClient, PendingAuth, PendingAuthStore};
use std::sync::Arc;

/// Cache-control applied to every engine-issued redirect.
const REDIRECT_CACHE_CONTROL: &str = "public, max-age=0";

/// Build an uncacheable 302 to `destination`.
fn redirect(destination: &str) -> SsoResult<Response> {
    let location = HeaderValue::from_str(destination)
        .map_err(|_| SsoError::Internal(format!("redirect destination {destination:?}")))?;
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::FOUND;
    response.headers_mut().insert(header::LOCATION, location);
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(REDIRECT_CACHE_CONTROL),
    );
    Ok(response)
}

fn with_set_cookie(mut response: Response, value: &str) -> SsoResult<Response> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| SsoError::Internal("cookie header value".into()))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}

/// Applies an [`Action`] against the request/response pipeline.
pub struct ActionExecutor {
    idp: Arc<dyn IdentityProviderClient>,
    pending: Arc<dyn PendingAuthStore>,
    routes: Arc<dyn RouteResolver>,
}

impl ActionExecutor {
    /// Create an executor over the identity-provider collaborators.
    pub fn new(
        idp: Arc<dyn IdentityProviderClient>,
        pending: Arc<dyn PendingAuthStore>,
        routes: Arc<dyn RouteResolver>,
    ) -> Self {
        Self {
            idp,
            pending,
            routes,
        }
    }

    /// Perform the action.
    ///
    /// Returns `Ok(None)` for pass-through, `Ok(Some(response))` when the
    /// engine takes over the request, and `Err` when execution failed and
    /// the pipeline should fall back to pass-through.
    pub async fn apply(
        &self,
        action: &Action,
        config: &EngineConfig,
        visitor: Option<&str>,
    ) -> SsoResult<Option<Response>> {
        match action {
            Action::PassThrough => Ok(None),

            Action::SetMarkerCookie { destination } => {
                let response = redirect(destination)?;
                let cookie = cookie::marker_cookie_header(config)?;
                Ok(Some(with_set_cookie(response, &cookie)?))
            }

            Action::DeleteMarkerCookie { redirect_to } => {
                let response = redirect(redirect_to)?;
                let cookie = cookie::clear_marker_cookie_header(config);
                Ok(Some(with_set_cookie(response, &cookie)?))
            }

            Action::ForceLogoutRedirect => {
                Ok(Some(redirect(&self.routes.logout_destination())?))
            }

            Action::RedirectToIdentityProvider {
                scopes,
                return_destination,
            } => {
                let (path, query) = match return_destination.split_once('?') {
                    Some((path, query)) => (path, Some(query)),
                    None => (return_destination.as_str(), None),
                };

                match visitor {
                    Some(visitor) => {
                        self.pending
                            .put(visitor, PendingAuth::login(path, query))
                            .await
                            .map_err(|e| SsoError::Internal(e.to_string()))?;
                    }
                    None => {
                        // Without a visitor key the callback falls back to
                        // the front page; still better than blocking login.
                        tracing::warn!("no visitor id, skipping pending-auth record");
                    }
                }

                let authorize = self
                    .idp
                    .authorize(scopes)
                    .await
                    .map_err(|e| SsoError::IdentityProviderUnavailable(e.to_string()))?;
                Ok(Some(redirect(&authorize.url)?))
            }
        }
    }
}

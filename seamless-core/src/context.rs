//! Per-request context for the decision engine.
//!
//! A [`RequestContext`] is built fresh for every inbound request from the
//! session provider, the route resolver, the cookie jar, and the domain
//! gate. It is immutable once constructed; the engine only reads it.

use crate::route::RouteKind;

/// Normalized view of one inbound request.
///
/// # Examples
///
/// ```
/// use seamless_core::{RequestContext, RouteKind};
///
/// let ctx = RequestContext::new(
///     false,
///     None,
///     RouteKind::Other,
///     true,
///     true,
///     "/projects/42?tab=usage",
/// );
/// assert!(ctx.marker_cookie_present);
/// assert_eq!(ctx.query(), Some("tab=usage"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Whether the session provider reports an authenticated visitor
    pub is_authenticated: bool,

    /// Account name, when the session provider knows it. Only used to exempt
    /// designated operational accounts from the forced logout.
    pub account: Option<String>,

    /// Classification of the matched route
    pub route: RouteKind,

    /// Whether the named marker cookie arrived with the request
    pub marker_cookie_present: bool,

    /// Verdict of the domain gate for this site
    pub domain_eligible: bool,

    /// Originally requested URI (path plus query), used as the redirect
    /// destination when the engine mints the cookie or delegates to the
    /// identity provider
    pub requested_uri: String,
}

impl RequestContext {
    /// Create a context from its normalized parts.
    pub fn new(
        is_authenticated: bool,
        account: Option<String>,
        route: RouteKind,
        marker_cookie_present: bool,
        domain_eligible: bool,
        requested_uri: impl Into<String>,
    ) -> Self {
        Self {
            is_authenticated,
            account,
            route,
            marker_cookie_present,
            domain_eligible,
            requested_uri: requested_uri.into(),
        }
    }

    /// Query-string portion of the requested URI, if any.
    pub fn query(&self) -> Option<&str> {
        self.requested_uri
            .split_once('?')
            .map(|(_, query)| query)
            .filter(|query| !query.is_empty())
    }
}

//! Session/auth state collaborator.
//!
//! The engine never inspects credentials; it only asks whether the current
//! visitor is authenticated and, optionally, under which account. Sites wire
//! in a provider backed by their session layer.

use axum::body::Body;
use axum::http::Request;

/// Auth state for one request.
#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
    /// Whether the visitor is authenticated
    pub authenticated: bool,

    /// Account name, when known
    pub account: Option<String>,

    /// Stable per-visitor key for the pending-auth slot (usually the
    /// session id)
    pub visitor_id: Option<String>,
}

impl SessionInfo {
    /// An anonymous visitor.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated visitor.
    pub fn authenticated_as(account: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account: Some(account.into()),
            visitor_id: None,
        }
    }

    /// Attach the per-visitor key.
    pub fn with_visitor_id(mut self, visitor_id: impl Into<String>) -> Self {
        self.visitor_id = Some(visitor_id.into());
        self
    }
}

/// Trait for session state providers.
pub trait SessionProvider: Send + Sync {
    /// Auth state for the given request.
    fn session(&self, request: &Request<Body>) -> SessionInfo;
}

/// Provider that reports the same state for every request.
///
/// Useful in tests and in single-tenant tools where the pipeline already
/// resolved the session before this layer runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    info: SessionInfo,
}

impl StaticSessionProvider {
    /// Create a provider that always reports `info`.
    pub fn new(info: SessionInfo) -> Self {
        Self { info }
    }
}

impl SessionProvider for StaticSessionProvider {
    fn session(&self, _request: &Request<Body>) -> SessionInfo {
        self.info.clone()
    }
}

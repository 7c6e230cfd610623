//! Error types for the seamless SSO engine
//!
//! This module defines all error types that can occur while extracting a
//! request context, reading configuration, or executing an action. The
//! decision engine itself is total and never fails; everything fallible lives
//! in its collaborators and degrades to passing the request through.

use thiserror::Error;

/// Seamless SSO error types.
///
/// These cover the failure modes of the engine's collaborators. None of them
/// is ever surfaced to the end user as an error page; the worst observable
/// outcome is an extra login prompt.
#[derive(Debug, Error)]
pub enum SsoError {
    /// Configuration store unreachable; the engine behaves as disabled
    #[error("Configuration unavailable: {0}")]
    ConfigurationUnavailable(String),

    /// The authorize call could not produce a redirect
    #[error("Identity provider unavailable: {0}")]
    IdentityProviderUnavailable(String),

    /// Marker cookie present but unparsable; treated as absent
    #[error("Malformed marker cookie: {0}")]
    MalformedCookie(String),

    /// The route resolver could not classify the request; treated as `Other`
    #[error("Route resolution failed: {0}")]
    RouteResolutionFailure(String),

    /// A setting failed validation and was not installed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for seamless SSO operations.
pub type SsoResult<T> = Result<T, SsoError>;

impl SsoError {
    /// Whether the request pipeline should fall back to pass-through.
    ///
    /// Every runtime failure degrades to pass-through so the site stays
    /// reachable. Only validation of new settings is allowed to be loud,
    /// since rejecting them leaves the previous configuration in place.
    pub fn degrades_to_pass_through(&self) -> bool {
        !matches!(self, SsoError::InvalidConfig(_))
    }

    /// Get error code for structured logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            SsoError::ConfigurationUnavailable(_) => "CONFIG_UNAVAILABLE",
            SsoError::IdentityProviderUnavailable(_) => "IDP_UNAVAILABLE",
            SsoError::MalformedCookie(_) => "MALFORMED_COOKIE",
            SsoError::RouteResolutionFailure(_) => "ROUTE_RESOLUTION_FAILURE",
            SsoError::InvalidConfig(_) => "INVALID_CONFIG",
            SsoError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

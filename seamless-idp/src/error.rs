//! Identity-provider error types.

use thiserror::Error;

/// Identity-provider collaborator errors.
#[derive(Debug, Error)]
pub enum IdpError {
    /// The provider configuration cannot produce an authorize URL
    #[error("Invalid provider configuration: {0}")]
    InvalidConfiguration(String),

    /// The authorize operation failed
    #[error("Authorize failed: {0}")]
    AuthorizeFailed(String),

    /// The pending-auth store rejected a read or write
    #[error("Pending-auth store error: {0}")]
    StoreError(String),
}

/// Result type for identity-provider operations.
pub type IdpResult<T> = Result<T, IdpError>;

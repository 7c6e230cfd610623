//! # Seamless SSO Identity-Provider Collaborator
//!
//! The decision engine in `seamless-core` treats the identity provider as an
//! opaque collaborator: given a scope set, it produces an authorization
//! redirect. This crate provides that collaborator:
//!
//! - **Provider configuration** ([`IdpConfig`]): endpoints, client id,
//!   scopes, PKCE toggle.
//! - **Client** ([`IdentityProviderClient`] / [`StandardIdpClient`]):
//!   builds the authorization-code redirect URL, minting fresh
//!   [`LoginState`] (random state, optional PKCE challenge) per request.
//! - **Pending-auth records** ([`PendingAuth`] / [`PendingAuthStore`]): the
//!   per-visitor slot written just before delegating to the provider and
//!   read back by the callback handling.
//!
//! Token exchange, credential validation, and session creation on the
//! callback leg are deliberately absent; they belong to the site's own
//! provider integration.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use seamless_idp::{IdentityProviderClient, IdpConfig, StandardIdpClient};
//!
//! # async fn example() -> seamless_idp::IdpResult<()> {
//! let client = StandardIdpClient::new(IdpConfig::new(
//!     "https://idp.example.org/authorize",
//!     "https://idp.example.org/logout",
//!     "meridian-portal",
//!     "https://support.meridian-ci.org/auth/return",
//! ));
//!
//! let redirect = client.authorize(&["openid".to_string()]).await?;
//! assert!(redirect.url.contains("response_type=code"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pending;
pub mod state;

// Re-export main types
pub use client::{AuthorizeRedirect, IdentityProviderClient, StandardIdpClient};
pub use config::IdpConfig;
pub use error::{IdpError, IdpResult};
pub use pending::{
    AuthOperation, FailingPendingAuthStore, MemoryPendingAuthStore, PendingAuth, PendingAuthStore,
};
pub use state::LoginState;

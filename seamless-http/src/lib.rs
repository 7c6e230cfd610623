//! # Seamless SSO HTTP Middleware
//!
//! Applies the `seamless-core` decision engine to an axum/tower request
//! pipeline. On every inbound request the middleware gates on site identity,
//! extracts an immutable request context, asks the engine for the single
//! action to take, and executes it: pass through, mint or expire the
//! cross-domain marker cookie, force a logout, or hand the visitor to the
//! identity provider.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use seamless_core::{ConfigStore, EngineConfig};
//! use seamless_http::{SeamlessSso, SessionInfo, StaticSessionProvider};
//! use seamless_idp::{IdpConfig, MemoryPendingAuthStore, StandardIdpClient};
//!
//! # fn example() -> seamless_core::SsoResult<Router> {
//! let config = ConfigStore::new(EngineConfig::default())?;
//! let idp = Arc::new(StandardIdpClient::new(IdpConfig::new(
//!     "https://idp.example.org/authorize",
//!     "https://idp.example.org/logout",
//!     "meridian-portal",
//!     "https://support.meridian-ci.org/auth/return",
//! )));
//! let sso = SeamlessSso::new(
//!     config,
//!     idp,
//!     Arc::new(MemoryPendingAuthStore::new()),
//!     Arc::new(StaticSessionProvider::new(SessionInfo::anonymous())),
//! );
//!
//! let app: Router = Router::new().layer(sso.layer());
//! # Ok(app)
//! # }
//! ```
//!
//! ## Failure posture
//!
//! Configuration, route-resolution, cookie-parsing, and identity-provider
//! failures all degrade to passing the request through unmodified. No error
//! is surfaced to the end user; the worst case is an extra login prompt.

pub mod admin;
pub mod cookie;
pub mod executor;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod session;

// Re-export main types
pub use executor::ActionExecutor;
pub use middleware::{SeamlessLayer, SeamlessService, SeamlessSso};
pub use session::{SessionInfo, SessionProvider, StaticSessionProvider};

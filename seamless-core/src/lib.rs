//! # Seamless SSO Core
//!
//! This crate provides the per-request SSO decision engine for the Meridian
//! portal family: a set of sibling sites on one parent domain that share a
//! CILogon-style identity provider. A visitor who authenticated on one site
//! is carried through the provider transparently on the others; a visitor
//! who logged out on one site is logged out everywhere on their next visit.
//!
//! ## Overview
//!
//! The cross-domain **marker cookie** encodes "this browser has been through
//! the seamless flow". Each request is evaluated independently:
//!
//! - **Domain gate** ([`DomainGate`]) decides whether the engine acts on
//!   this site at all.
//! - **Request context** ([`RequestContext`]) is the normalized, immutable
//!   view of one request: auth status, route, marker presence, gate verdict.
//! - **Decision engine** ([`DecisionEngine`]) maps a context to exactly one
//!   [`Action`] through an ordered rule table. Pure, total, no I/O.
//! - **Debug trace** ([`trace::emit`]) records the context and the chosen
//!   action once per request when enabled.
//!
//! Executing an action against the HTTP pipeline lives in `seamless-http`;
//! the identity-provider collaborator lives in `seamless-idp`.
//!
//! ## Usage
//!
//! ```rust
//! use seamless_core::{Action, DecisionEngine, EngineConfig, RequestContext, RouteKind};
//!
//! let engine = DecisionEngine::new(vec!["openid".into()], "https://idp.example.org/logout");
//! let config = EngineConfig::default();
//!
//! // Anonymous visitor carrying the marker cookie: seamless login.
//! let ctx = RequestContext::new(false, None, RouteKind::Other, true, true, "/projects");
//! assert!(matches!(
//!     engine.decide(&config, &ctx),
//!     Action::RedirectToIdentityProvider { .. }
//! ));
//! ```
//!
//! ## Failure posture
//!
//! The engine never raises errors. All fallibility lives in the
//! collaborators (configuration store, route resolver, identity provider)
//! and every failure degrades to passing the request through; the worst
//! observable outcome is an extra login prompt.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod gate;
pub mod route;
pub mod trace;

// Re-export main types
pub use config::{parse_relative_expiration, ConfigStore, EngineConfig};
pub use context::RequestContext;
pub use engine::{Action, DecisionEngine};
pub use error::{SsoError, SsoResult};
pub use gate::{DomainGate, FixedSiteResolver, SiteIdentityResolver};
pub use route::{RouteKind, RouteResolver, RouteTable};

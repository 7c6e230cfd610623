//! Debug trace emitter.
//!
//! One structured event per request with the full `(context, action)` pair,
//! gated on [`EngineConfig::debug`]. Diagnostics stay out of the decision
//! logic; the engine is traced from the outside.

use crate::config::EngineConfig;
use crate::context::RequestContext;
use crate::engine::Action;

/// Record the inputs and the chosen action for one request.
pub fn emit(config: &EngineConfig, ctx: &RequestContext, action: &Action) {
    if !config.debug {
        return;
    }
    tracing::debug!(
        target: "seamless_sso",
        route = ctx.route.as_str(),
        authenticated = ctx.is_authenticated,
        account = ctx.account.as_deref().unwrap_or("<anonymous>"),
        marker_cookie = ctx.marker_cookie_present,
        domain_eligible = ctx.domain_eligible,
        uri = %ctx.requested_uri,
        action = action.kind(),
        "seamless decision"
    );
}

//! Seamless SSO middleware.
//!
//! Runs once per inbound request: the domain gate and context extractor
//! feed the decision engine, the executor applies the chosen action, and
//! the trace emitter records the pair. Any collaborator failure passes the
//! request through unmodified.

use crate::executor::ActionExecutor;
use crate::extract;
use crate::session::SessionProvider;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use seamless_core::{
    trace, ConfigStore, DecisionEngine, DomainGate, RouteResolver, RouteTable,
};
use seamless_idp::{IdentityProviderClient, PendingAuthStore};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

/// Wiring for the seamless SSO pipeline on one site.
pub struct SeamlessSso {
    config: ConfigStore,
    engine: DecisionEngine,
    gate: DomainGate,
    session: Arc<dyn SessionProvider>,
    routes: Arc<dyn RouteResolver>,
    executor: ActionExecutor,
}

impl SeamlessSso {
    /// Wire the engine with the default route table and an open domain gate.
    pub fn new(
        config: ConfigStore,
        idp: Arc<dyn IdentityProviderClient>,
        pending: Arc<dyn PendingAuthStore>,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        Self::with_routes(config, idp, pending, session, Arc::new(RouteTable::default()))
    }

    /// Wire the engine with a custom route resolver.
    pub fn with_routes(
        config: ConfigStore,
        idp: Arc<dyn IdentityProviderClient>,
        pending: Arc<dyn PendingAuthStore>,
        session: Arc<dyn SessionProvider>,
        routes: Arc<dyn RouteResolver>,
    ) -> Self {
        let engine = DecisionEngine::new(idp.scopes().to_vec(), idp.logout_url());
        let executor = ActionExecutor::new(idp, pending, Arc::clone(&routes));
        Self {
            config,
            engine,
            gate: DomainGate::open(),
            session,
            routes,
            executor,
        }
    }

    /// Install a domain gate for multi-site deployments.
    pub fn with_gate(mut self, gate: DomainGate) -> Self {
        self.gate = gate;
        self
    }

    /// Access the configuration store (for the admin surface).
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Turn the wiring into a tower layer.
    pub fn layer(self) -> SeamlessLayer {
        SeamlessLayer {
            sso: Arc::new(self),
        }
    }
}

/// Layer for the seamless SSO middleware.
#[derive(Clone)]
pub struct SeamlessLayer {
    sso: Arc<SeamlessSso>,
}

impl<S> Layer<S> for SeamlessLayer {
    type Service = SeamlessService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SeamlessService {
            inner,
            sso: Arc::clone(&self.sso),
        }
    }
}

/// Seamless SSO service wrapper.
#[derive(Clone)]
pub struct SeamlessService<S> {
    inner: S,
    sso: Arc<SeamlessSso>,
}

impl<S> Service<Request<Body>> for SeamlessService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let sso = Arc::clone(&self.sso);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let config = match sso.config.snapshot() {
                Ok(config) => config,
                Err(error) => {
                    // Unreachable configuration reads as disabled.
                    tracing::warn!(
                        error = %error,
                        code = error.error_code(),
                        "configuration unavailable, passing request through"
                    );
                    return inner.call(request).await;
                }
            };

            let session = sso.session.session(&request);
            let ctx = extract::build_context(
                &request,
                &config,
                &session,
                sso.routes.as_ref(),
                &sso.gate,
            );
            let action = sso.engine.decide(&config, &ctx);
            trace::emit(&config, &ctx, &action);

            match sso
                .executor
                .apply(&action, &config, session.visitor_id.as_deref())
                .await
            {
                Ok(Some(response)) => Ok(response),
                Ok(None) => inner.call(request).await,
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        code = error.error_code(),
                        action = action.kind(),
                        "seamless action failed, passing request through"
                    );
                    inner.call(request).await
                }
            }
        })
    }
}

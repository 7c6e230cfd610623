//! Domain gate: should the engine act on this site at all?
//!
//! When several sites share one codebase behind a multi-site partitioning
//! layer, only the designated primary site (the support portal) runs the
//! seamless flow. Without partitioning the gate is always open. An
//! unreachable identity source must never cause the engine to act on the
//! wrong site, so resolution failures gate the engine off.

use crate::config::EngineConfig;
use crate::error::SsoResult;
use std::sync::Arc;

/// Resolves which site identity is serving the current process.
///
/// Implementations typically consult the host's multi-site registry. The
/// resolver is only installed when partitioning is actually in use.
pub trait SiteIdentityResolver: Send + Sync {
    /// Identity of the site handling this request.
    fn current_site(&self) -> SsoResult<String>;
}

/// Resolver for deployments where the site identity is fixed per process.
#[derive(Debug, Clone)]
pub struct FixedSiteResolver {
    site: String,
}

impl FixedSiteResolver {
    /// Create a resolver that always reports the given site.
    pub fn new(site: impl Into<String>) -> Self {
        Self { site: site.into() }
    }
}

impl SiteIdentityResolver for FixedSiteResolver {
    fn current_site(&self) -> SsoResult<String> {
        Ok(self.site.clone())
    }
}

/// Eligibility check limiting the engine to one designated site.
#[derive(Clone, Default)]
pub struct DomainGate {
    resolver: Option<Arc<dyn SiteIdentityResolver>>,
}

impl DomainGate {
    /// Gate for deployments without multi-site partitioning: always open.
    pub fn open() -> Self {
        Self { resolver: None }
    }

    /// Gate backed by a site-identity resolver.
    pub fn new(resolver: Arc<dyn SiteIdentityResolver>) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// Whether the engine should act for this site.
    ///
    /// Fail-open only when no partitioning mechanism is installed; with a
    /// resolver installed, a resolution failure fails closed.
    pub fn eligible(&self, config: &EngineConfig) -> bool {
        let Some(resolver) = &self.resolver else {
            return true;
        };
        let Some(primary) = &config.primary_site else {
            // Partitioning installed but the engine is not pinned to a site.
            return true;
        };
        match resolver.current_site() {
            Ok(site) => site == *primary,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "site identity resolution failed, gating seamless engine off"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SsoError;

    struct BrokenResolver;

    impl SiteIdentityResolver for BrokenResolver {
        fn current_site(&self) -> SsoResult<String> {
            Err(SsoError::Internal("registry unreachable".into()))
        }
    }

    fn pinned_config(primary: &str) -> EngineConfig {
        EngineConfig {
            primary_site: Some(primary.to_string()),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_open_gate_without_partitioning() {
        let gate = DomainGate::open();
        assert!(gate.eligible(&EngineConfig::default()));
        assert!(gate.eligible(&pinned_config("support")));
    }

    #[test]
    fn test_primary_site_match() {
        let gate = DomainGate::new(Arc::new(FixedSiteResolver::new("support")));
        assert!(gate.eligible(&pinned_config("support")));
        assert!(!gate.eligible(&pinned_config("docs")));
    }

    #[test]
    fn test_unpinned_config_leaves_gate_open() {
        let gate = DomainGate::new(Arc::new(FixedSiteResolver::new("support")));
        assert!(gate.eligible(&EngineConfig::default()));
    }

    #[test]
    fn test_resolution_failure_fails_closed() {
        let gate = DomainGate::new(Arc::new(BrokenResolver));
        assert!(!gate.eligible(&pinned_config("support")));
    }
}

//! Identity-provider client.
//!
//! The engine treats the provider as an opaque collaborator with one
//! operation: given a scope set, produce an authorization redirect. The
//! standard client builds the redirect URL itself; deployments with a
//! provider SDK can implement [`IdentityProviderClient`] over it instead.

use crate::config::IdpConfig;
use crate::error::{IdpError, IdpResult};
use crate::state::LoginState;
use async_trait::async_trait;

/// An authorization redirect produced by the provider client.
#[derive(Debug, Clone)]
pub struct AuthorizeRedirect {
    /// Full authorization URL including query parameters
    pub url: String,

    /// State minted for this redirect, for the callback collaborator to
    /// validate and finish
    pub state: LoginState,
}

/// Trait for identity-provider client implementations.
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    /// Produce an authorization redirect for the given scopes.
    async fn authorize(&self, scopes: &[String]) -> IdpResult<AuthorizeRedirect>;

    /// Scopes this provider should be asked for by default.
    fn scopes(&self) -> &[String];

    /// Provider logout endpoint.
    fn logout_url(&self) -> &str;
}

/// Client that constructs authorization-code redirects from configuration.
#[derive(Debug, Clone)]
pub struct StandardIdpClient {
    config: IdpConfig,
}

impl StandardIdpClient {
    /// Create a client for the configured provider.
    pub fn new(config: IdpConfig) -> Self {
        Self { config }
    }

    /// Access the provider configuration.
    pub fn config(&self) -> &IdpConfig {
        &self.config
    }
}

#[async_trait]
impl IdentityProviderClient for StandardIdpClient {
    async fn authorize(&self, scopes: &[String]) -> IdpResult<AuthorizeRedirect> {
        let state = if self.config.pkce {
            LoginState::with_pkce()
        } else {
            LoginState::new()
        };

        let mut url = url::Url::parse(&self.config.authorize_url)
            .map_err(|e| IdpError::InvalidConfiguration(e.to_string()))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("response_type", "code");
            query.append_pair("client_id", &self.config.client_id);
            query.append_pair("redirect_uri", &self.config.redirect_url);
            query.append_pair("scope", &scopes.join(" "));
            query.append_pair("state", &state.value);
            if let Some(challenge) = state.code_challenge() {
                query.append_pair("code_challenge", &challenge);
                query.append_pair("code_challenge_method", "S256");
            }
            for (key, value) in &self.config.extra_params {
                query.append_pair(key, value);
            }
        }

        Ok(AuthorizeRedirect {
            url: url.to_string(),
            state,
        })
    }

    fn scopes(&self) -> &[String] {
        &self.config.scopes
    }

    fn logout_url(&self) -> &str {
        &self.config.logout_url
    }
}

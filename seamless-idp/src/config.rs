//! Identity-provider configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for one identity provider.
///
/// The engine only ever asks the provider for an authorization redirect;
/// token exchange on the callback leg belongs to the site's own provider
/// integration and is not represented here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdpConfig {
    /// Authorization endpoint
    pub authorize_url: String,

    /// Provider logout endpoint, the destination of the marker-deleting
    /// redirect
    pub logout_url: String,

    /// Client ID registered with the provider
    pub client_id: String,

    /// Redirect URL the provider returns to (the site's callback)
    pub redirect_url: String,

    /// Scopes to request
    pub scopes: Vec<String>,

    /// Whether to attach a PKCE challenge to authorize requests
    #[serde(default = "default_true")]
    pub pkce: bool,

    /// Additional query parameters
    #[serde(default)]
    pub extra_params: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl IdpConfig {
    /// Create a provider configuration with the default scope set.
    pub fn new(
        authorize_url: impl Into<String>,
        logout_url: impl Into<String>,
        client_id: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            authorize_url: authorize_url.into(),
            logout_url: logout_url.into(),
            client_id: client_id.into(),
            redirect_url: redirect_url.into(),
            scopes: Self::default_scopes()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            pkce: true,
            extra_params: HashMap::new(),
        }
    }

    /// Default scopes requested from the provider.
    pub fn default_scopes() -> Vec<&'static str> {
        vec!["openid", "email", "profile"]
    }

    /// Replace the requested scopes.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Add an extra query parameter to every authorize request.
    pub fn with_extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

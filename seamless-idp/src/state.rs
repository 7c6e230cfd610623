//! Per-login state carried through the provider round-trip.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// State minted for one authorize redirect.
///
/// Carries the random `state` value the provider echoes back and, when PKCE
/// is enabled, the code verifier whose challenge rides along on the
/// authorize URL. The callback collaborator validates the echo and finishes
/// the exchange; this crate only mints and serializes the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginState {
    /// Random state value echoed back by the provider
    pub value: String,

    /// PKCE code verifier, when the PKCE flow is in use
    pub code_verifier: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

fn random_token(len: usize) -> String {
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

impl LoginState {
    /// Mint a new login state without PKCE.
    pub fn new() -> Self {
        Self {
            value: random_token(32),
            code_verifier: None,
            created_at: Utc::now(),
        }
    }

    /// Mint a new login state with a PKCE verifier.
    pub fn with_pkce() -> Self {
        let mut state = Self::new();
        state.code_verifier = Some(random_token(64));
        state
    }

    /// S256 code challenge for the verifier, if PKCE is in use.
    pub fn code_challenge(&self) -> Option<String> {
        use sha2::{Digest, Sha256};

        self.code_verifier.as_ref().map(|verifier| {
            let mut hasher = Sha256::new();
            hasher.update(verifier.as_bytes());
            let hash = hasher.finalize();
            base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, hash)
        })
    }

    /// Whether the state is too old to accept (default: 10 minutes).
    pub fn is_expired(&self) -> bool {
        Utc::now() - self.created_at > Duration::minutes(10)
    }
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_state() {
        let state = LoginState::new();
        assert_eq!(state.value.len(), 32);
        assert!(!state.is_expired());
        assert!(state.code_verifier.is_none());
        assert!(state.code_challenge().is_none());
    }

    #[test]
    fn test_login_state_with_pkce() {
        let state = LoginState::with_pkce();
        assert!(state.code_verifier.is_some());
        let challenge = state.code_challenge().unwrap();
        assert!(!challenge.is_empty());
        // URL-safe, unpadded
        assert!(!challenge.contains('='));
        assert!(!challenge.contains('+'));
    }

    #[test]
    fn test_states_are_unique() {
        assert_ne!(LoginState::new().value, LoginState::new().value);
    }

    #[test]
    fn test_expiry() {
        let mut state = LoginState::new();
        state.created_at = Utc::now() - Duration::minutes(11);
        assert!(state.is_expired());
    }
}

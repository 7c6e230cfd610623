//! Engine configuration and the shared configuration store.
//!
//! [`EngineConfig`] holds everything the admin surface exposes: the
//! enable/disable flag, the marker cookie attributes, the exempt account
//! list, the callback path, and the debug flag. [`ConfigStore`] shares one
//! config across concurrently handled requests; readers take a snapshot and
//! writers swap the whole value so a request never observes a half-updated
//! configuration.

use crate::error::{SsoError, SsoResult};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Engine configuration.
///
/// Loaded at request-pipeline start and read-only from the engine's
/// perspective. Updates go through [`ConfigStore::update`], which validates
/// and swaps atomically.
///
/// # Examples
///
/// ```
/// use seamless_core::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert!(config.enabled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether the engine acts at all. Disabled must never block reaching
    /// the admin surface, so `false` means pass everything through.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Marker cookie name. The hosting platform only exempts cookies named
    /// `SESS` + lowercase alphanumerics from its page cache, so the name
    /// must match that pattern.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Marker cookie value. `None` falls back to [`EngineConfig::site_name`].
    #[serde(default)]
    pub cookie_value: Option<String>,

    /// Wildcard parent domain shared by the sibling sites.
    #[serde(default = "default_cookie_domain")]
    pub cookie_domain: String,

    /// Cookie expiration as a relative-time expression, e.g. `"+18 hours"`.
    #[serde(default = "default_cookie_expiration")]
    pub cookie_expiration: String,

    /// Account names never force-logged-out for a missing marker cookie.
    #[serde(default)]
    pub exempt_accounts: HashSet<String>,

    /// Emit a trace event with the context and chosen action per request.
    #[serde(default)]
    pub debug: bool,

    /// Path of the identity-provider return callback. Paired with
    /// `cookie_name`: the same config value feeds both the route check and
    /// the cookie mutation, so the two can never diverge.
    #[serde(default = "default_return_callback_path")]
    pub return_callback_path: String,

    /// Site identifier the engine is pinned to when multi-site partitioning
    /// is in use. `None` means the gate is open everywhere.
    #[serde(default)]
    pub primary_site: Option<String>,

    /// Name of the local site, used as the default cookie value.
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

fn default_true() -> bool {
    true
}

fn default_cookie_name() -> String {
    "SESSseamlesssso".to_string()
}

fn default_cookie_domain() -> String {
    ".meridian-ci.org".to_string()
}

fn default_cookie_expiration() -> String {
    "+18 hours".to_string()
}

fn default_return_callback_path() -> String {
    "/auth/return".to_string()
}

fn default_site_name() -> String {
    "Meridian Support".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cookie_name: default_cookie_name(),
            cookie_value: None,
            cookie_domain: default_cookie_domain(),
            cookie_expiration: default_cookie_expiration(),
            exempt_accounts: HashSet::new(),
            debug: false,
            return_callback_path: default_return_callback_path(),
            primary_site: None,
            site_name: default_site_name(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// Checks the cookie-name pattern, the expiration grammar, and that the
    /// cookie has a domain and a value to fall back to.
    pub fn validate(&self) -> SsoResult<()> {
        let rest = self.cookie_name.strip_prefix("SESS").ok_or_else(|| {
            SsoError::InvalidConfig(format!(
                "cookie name {:?} must start with \"SESS\"",
                self.cookie_name
            ))
        })?;
        if rest.is_empty()
            || !rest
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(SsoError::InvalidConfig(format!(
                "cookie name {:?} must be \"SESS\" followed by lowercase alphanumerics",
                self.cookie_name
            )));
        }
        if self.cookie_domain.is_empty() {
            return Err(SsoError::InvalidConfig("cookie domain is empty".into()));
        }
        if self.site_name.is_empty() && self.cookie_value.is_none() {
            return Err(SsoError::InvalidConfig(
                "no cookie value and no site name to fall back to".into(),
            ));
        }
        if self.return_callback_path.is_empty() || !self.return_callback_path.starts_with('/') {
            return Err(SsoError::InvalidConfig(format!(
                "return callback path {:?} must be an absolute path",
                self.return_callback_path
            )));
        }
        parse_relative_expiration(&self.cookie_expiration)?;
        Ok(())
    }

    /// Effective cookie value: the configured value or the site name.
    pub fn cookie_value(&self) -> &str {
        self.cookie_value.as_deref().unwrap_or(&self.site_name)
    }

    /// Cookie time-to-live parsed from the relative expression.
    pub fn cookie_ttl(&self) -> SsoResult<Duration> {
        parse_relative_expiration(&self.cookie_expiration)
    }

    /// Whether an account is exempt from the forced logout.
    pub fn is_exempt(&self, account: &str) -> bool {
        self.exempt_accounts.contains(account)
    }
}

/// Parse a relative-time expression into a [`Duration`].
///
/// Accepts the subset of the admin form's grammar that the cookie expiration
/// actually uses: an optional leading `+`, an amount, and a unit
/// (`seconds`/`minutes`/`hours`/`days`/`weeks`, singular or plural).
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use seamless_core::config::parse_relative_expiration;
///
/// assert_eq!(parse_relative_expiration("+18 hours").unwrap(), Duration::hours(18));
/// assert_eq!(parse_relative_expiration("1 week").unwrap(), Duration::weeks(1));
/// ```
pub fn parse_relative_expiration(expr: &str) -> SsoResult<Duration> {
    let trimmed = expr.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut parts = trimmed.split_whitespace();
    let (amount, unit) = match (parts.next(), parts.next(), parts.next()) {
        (Some(amount), Some(unit), None) => (amount, unit),
        _ => {
            return Err(SsoError::InvalidConfig(format!(
                "expiration {expr:?} must look like \"+18 hours\""
            )))
        }
    };
    let amount: i64 = amount.parse().map_err(|_| {
        SsoError::InvalidConfig(format!("expiration amount {amount:?} is not a number"))
    })?;
    if amount <= 0 {
        return Err(SsoError::InvalidConfig(format!(
            "expiration {expr:?} must be in the future"
        )));
    }
    match unit.to_lowercase().trim_end_matches('s') {
        "second" => Ok(Duration::seconds(amount)),
        "minute" => Ok(Duration::minutes(amount)),
        "hour" => Ok(Duration::hours(amount)),
        "day" => Ok(Duration::days(amount)),
        "week" => Ok(Duration::weeks(amount)),
        _ => Err(SsoError::InvalidConfig(format!(
            "unknown expiration unit {unit:?}"
        ))),
    }
}

/// Shared configuration store.
///
/// Read-mostly: every request takes a cheap snapshot; the admin surface
/// installs a whole new config in one swap. A snapshot keeps the config it
/// was taken with even if an update lands mid-request.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Arc<EngineConfig>>>,
}

impl ConfigStore {
    /// Create a store with a validated initial configuration.
    pub fn new(config: EngineConfig) -> SsoResult<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        })
    }

    /// Take a snapshot of the current configuration.
    ///
    /// Fails only when the store itself is unusable, which callers treat as
    /// the engine being disabled.
    pub fn snapshot(&self) -> SsoResult<Arc<EngineConfig>> {
        self.inner
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| SsoError::ConfigurationUnavailable("config store poisoned".into()))
    }

    /// Validate and install a new configuration in one swap.
    ///
    /// On validation failure the previous configuration stays in place.
    pub fn update(&self, config: EngineConfig) -> SsoResult<()> {
        config.validate()?;
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SsoError::ConfigurationUnavailable("config store poisoned".into()))?;
        *guard = Arc::new(config);
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(EngineConfig::default()))),
        }
    }
}

//! Marker-cookie header helpers.
//!
//! The presence check, the set, and the delete all read the same
//! [`EngineConfig`] values; there is no second cookie-name constant to drift
//! out of sync. A Cookie header that cannot be parsed reads as "marker
//! absent" rather than failing the request.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use seamless_core::{EngineConfig, SsoResult};

/// Build the `Set-Cookie` value that mints the marker.
///
/// Attributes follow the cross-domain contract: path `/`, the configured
/// wildcard parent domain, and a `Max-Age` computed from the configured
/// relative expiration.
pub fn marker_cookie_header(config: &EngineConfig) -> SsoResult<String> {
    let max_age = config.cookie_ttl()?.num_seconds();
    Ok(format!(
        "{}={}; Domain={}; Path=/; Max-Age={}",
        config.cookie_name,
        config.cookie_value(),
        config.cookie_domain,
        max_age
    ))
}

/// Build the `Set-Cookie` value that expires the marker.
///
/// Same name, domain, and path as the set operation, with the expiry in the
/// past.
pub fn clear_marker_cookie_header(config: &EngineConfig) -> String {
    format!(
        "{}=; Domain={}; Path=/; Max-Age=0",
        config.cookie_name, config.cookie_domain
    )
}

/// Value of the named marker cookie in the incoming request, if any.
///
/// Parses the Cookie header (format: `name1=value1; name2=value2`). A header
/// that is not valid ASCII is treated as carrying no marker.
pub fn marker_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let raw = match header.to_str() {
        Ok(raw) => raw,
        Err(_) => {
            tracing::debug!("cookie header is not valid ascii, treating marker as absent");
            return None;
        }
    };

    for part in raw.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{name}=")) {
            return Some(value.trim().to_string());
        }
    }

    None
}

/// Whether the named marker cookie arrived with the request.
pub fn marker_cookie_present(headers: &HeaderMap, name: &str) -> bool {
    marker_cookie_value(headers, name).is_some()
}

//! Auxiliary handlers.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

/// Uncacheable landing redirect to the front page.
///
/// Used as the post-login landing target so the cookie-bearing response is
/// never served from a page cache to a different visitor.
pub async fn no_cache_landing() -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/"),
            (header::CACHE_CONTROL, "no-store, must-revalidate"),
        ],
        (),
    )
}

/// Router exposing the landing endpoint.
pub fn router() -> Router {
    Router::new().route("/seamless/nc", get(no_cache_landing))
}

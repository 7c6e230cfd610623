//! Admin settings surface.
//!
//! Collaborator-facing JSON routes over the [`ConfigStore`]: `GET` returns
//! the current configuration, `PUT` validates and installs a new one in a
//! single swap. Invalid settings are rejected and never installed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use seamless_core::{ConfigStore, EngineConfig, SsoError};

/// Router exposing the settings endpoints.
pub fn router(store: ConfigStore) -> Router {
    Router::new()
        .route("/seamless/settings", get(get_settings).put(put_settings))
        .with_state(store)
}

async fn get_settings(
    State(store): State<ConfigStore>,
) -> Result<Json<EngineConfig>, (StatusCode, String)> {
    store
        .snapshot()
        .map(|config| Json((*config).clone()))
        .map_err(|error| (StatusCode::SERVICE_UNAVAILABLE, error.to_string()))
}

async fn put_settings(
    State(store): State<ConfigStore>,
    Json(config): Json<EngineConfig>,
) -> Result<StatusCode, (StatusCode, String)> {
    match store.update(config) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error @ SsoError::InvalidConfig(_)) => {
            Err((StatusCode::UNPROCESSABLE_ENTITY, error.to_string()))
        }
        Err(error) => Err((StatusCode::SERVICE_UNAVAILABLE, error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_get_settings() {
        let store = ConfigStore::default();
        let app = router(store);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/seamless/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let config: EngineConfig = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(config.cookie_name, "SESSseamlesssso");
    }

    #[tokio::test]
    async fn test_put_settings_swaps_config() {
        let store = ConfigStore::default();
        let app = router(store.clone());

        let mut next = EngineConfig::default();
        next.debug = true;
        next.cookie_expiration = "+2 days".to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/seamless/settings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&next).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let current = store.snapshot().unwrap();
        assert!(current.debug);
        assert_eq!(current.cookie_expiration, "+2 days");
    }

    #[tokio::test]
    async fn test_put_rejects_invalid_settings() {
        let store = ConfigStore::default();
        let app = router(store.clone());

        let mut bad = EngineConfig::default();
        bad.cookie_name = "no_cache_buster".to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/seamless/settings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&bad).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        // The previous configuration stays installed.
        assert_eq!(store.snapshot().unwrap().cookie_name, "SESSseamlesssso");
    }
}

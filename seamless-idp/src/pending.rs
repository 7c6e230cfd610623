//! Pending-auth records.
//!
//! Immediately before the engine delegates a visitor to the identity
//! provider, it records where they were going. The callback collaborator
//! reads the record back after the provider returns and replays the
//! original destination.

use crate::error::{IdpError, IdpResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Operation recorded for the provider round-trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthOperation {
    /// Seamless login
    Login,
}

impl AuthOperation {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOperation::Login => "login",
        }
    }
}

/// One visitor's pending authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAuth {
    /// Record ID
    pub id: Uuid,

    /// Operation in flight
    pub operation: AuthOperation,

    /// Destination to return the visitor to
    pub destination: String,

    /// Query parameters of the original request
    #[serde(default)]
    pub query: HashMap<String, String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl PendingAuth {
    /// Record a pending login back to `destination`.
    ///
    /// `query` is the raw query string of the original request; it is parsed
    /// into a map so the callback can rebuild the URL.
    pub fn login(destination: impl Into<String>, query: Option<&str>) -> Self {
        let query = query
            .map(|raw| {
                url::form_urlencoded::parse(raw.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: Uuid::now_v7(),
            operation: AuthOperation::Login,
            destination: destination.into(),
            query,
            created_at: Utc::now(),
        }
    }
}

/// Per-visitor slot for the pending-auth record.
///
/// Deployments back this with their session layer; the in-memory
/// implementation serves single-process sites and tests.
#[async_trait]
pub trait PendingAuthStore: Send + Sync {
    /// Store the record for a visitor, replacing any previous one.
    async fn put(&self, visitor: &str, record: PendingAuth) -> IdpResult<()>;

    /// Remove and return the visitor's record, if any.
    async fn take(&self, visitor: &str) -> IdpResult<Option<PendingAuth>>;
}

/// In-memory pending-auth store.
#[derive(Default)]
pub struct MemoryPendingAuthStore {
    slots: Arc<RwLock<HashMap<String, PendingAuth>>>,
}

impl MemoryPendingAuthStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingAuthStore for MemoryPendingAuthStore {
    async fn put(&self, visitor: &str, record: PendingAuth) -> IdpResult<()> {
        let mut slots = self.slots.write().await;
        slots.insert(visitor.to_string(), record);
        Ok(())
    }

    async fn take(&self, visitor: &str) -> IdpResult<Option<PendingAuth>> {
        let mut slots = self.slots.write().await;
        Ok(slots.remove(visitor))
    }
}

/// Store whose writes always fail, for exercising degradation paths.
#[derive(Debug, Default)]
pub struct FailingPendingAuthStore;

#[async_trait]
impl PendingAuthStore for FailingPendingAuthStore {
    async fn put(&self, _visitor: &str, _record: PendingAuth) -> IdpResult<()> {
        Err(IdpError::StoreError("session backend unavailable".into()))
    }

    async fn take(&self, _visitor: &str) -> IdpResult<Option<PendingAuth>> {
        Err(IdpError::StoreError("session backend unavailable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_auth_parses_query() {
        let record = PendingAuth::login("/projects/42", Some("tab=usage&sort=name"));
        assert_eq!(record.operation, AuthOperation::Login);
        assert_eq!(record.destination, "/projects/42");
        assert_eq!(record.query.get("tab").map(String::as_str), Some("usage"));
        assert_eq!(record.query.get("sort").map(String::as_str), Some("name"));
    }

    #[test]
    fn test_pending_auth_without_query() {
        let record = PendingAuth::login("/", None);
        assert!(record.query.is_empty());
        assert_eq!(record.operation.as_str(), "login");
    }

    #[tokio::test]
    async fn test_memory_store_put_take() {
        let store = MemoryPendingAuthStore::new();
        store
            .put("visitor-1", PendingAuth::login("/docs", None))
            .await
            .unwrap();

        let record = store.take("visitor-1").await.unwrap().unwrap();
        assert_eq!(record.destination, "/docs");

        // Taken exactly once.
        assert!(store.take("visitor-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_replaces_previous_record() {
        let store = MemoryPendingAuthStore::new();
        store
            .put("visitor-1", PendingAuth::login("/a", None))
            .await
            .unwrap();
        store
            .put("visitor-1", PendingAuth::login("/b", None))
            .await
            .unwrap();

        let record = store.take("visitor-1").await.unwrap().unwrap();
        assert_eq!(record.destination, "/b");
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingPendingAuthStore;
        assert!(store
            .put("visitor-1", PendingAuth::login("/", None))
            .await
            .is_err());
    }
}

use async_trait::async_trait;
use std::time::Duration;

/// Query cache port - abstraction over the store backing the query layer.
///
/// Values are serialized JSON keyed by query key (`"users"`,
/// `"users:42"`, ...).
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Get a fresh value, or `None` when missing or expired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Drop a key so the next fetch goes to the backend.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry, e.g. when the session ends.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("operation failed: {0}")]
    Operation(String),
}

//! Best-effort key/value cache.
//!
//! Failures are logged and swallowed: `set` never errors and `get` treats an unreachable
//! cache the same as a miss. Entries expire only through their TTL.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ProductError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCache: Send + Sync {
    /// Store `value` under `key`. A zero `ttl` stores without expiry.
    async fn set(&self, key: &str, value: &str, ttl: Duration);

    /// `None` on a miss and when the cache cannot be reached.
    async fn get(&self, key: &str) -> Option<String>;

    /// TTL applied by callers that have no better value.
    fn default_ttl(&self) -> Duration;
}

/// Redis-backed [`ProductCache`]
#[derive(Clone)]
pub struct RedisProductCache {
    redis: ConnectionManager,
    default_ttl: Duration,
}

impl RedisProductCache {
    pub fn new(redis: ConnectionManager, default_ttl: Duration) -> Self {
        Self { redis, default_ttl }
    }

    async fn try_set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ProductError> {
        let mut conn = self.redis.clone();
        let result = if ttl.is_zero() {
            conn.set::<_, _, ()>(key, value).await
        } else {
            conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await
        };
        result.map_err(|e| ProductError::Cache(e.to_string()))
    }

    async fn try_get(&self, key: &str) -> Result<Option<String>, ProductError> {
        let mut conn = self.redis.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| ProductError::Cache(e.to_string()))
    }
}

#[async_trait]
impl ProductCache for RedisProductCache {
    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        match self.try_set(key, value, ttl).await {
            Ok(()) => debug!(key, ttl_secs = ttl.as_secs(), "Cached value"),
            Err(e) => warn!(key, error = %e, "Cache set failed"),
        }
    }

    async fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Cache get failed, treating as miss");
                None
            }
        }
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

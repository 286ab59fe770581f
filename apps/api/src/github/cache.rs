use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Client as RedisClient, RedisResult};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::github::{GitHubError, RepoSource};
use crate::models::repository::Repository;

const CACHE_KEY_PREFIX: &str = "devfolio:repos:";
/// Upper bound on each cache round trip, connection setup included.
pub const CACHE_OP_TIMEOUT: Duration = Duration::from_millis(250);

/// Decorates a `RepoSource` with a time-bounded Redis cache so page loads
/// revalidate the listing at most once per TTL.
///
/// Redis problems never fail a listing: errors and slow round trips are
/// logged, count as a miss, and the inner source is used directly. Failed
/// listings are not cached.
pub struct CachedRepoSource {
    inner: Arc<dyn RepoSource>,
    redis: RedisClient,
    ttl_secs: u64,
    /// Shared multiplexed connection, dropped after any failure and
    /// re-established on the next call.
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl CachedRepoSource {
    pub fn new(inner: Arc<dyn RepoSource>, redis: RedisClient, ttl_secs: u64) -> Self {
        Self {
            inner,
            redis,
            ttl_secs,
            conn: Mutex::new(None),
        }
    }

    async fn connection(&self) -> RedisResult<MultiplexedConnection> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self.redis.get_multiplexed_async_connection().await?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Runs one cache operation under `CACHE_OP_TIMEOUT`. Any failure is
    /// logged, drops the shared connection, and yields `None`.
    async fn bounded<T>(
        &self,
        op: &str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> Option<T> {
        let failure = match timeout(CACHE_OP_TIMEOUT, fut).await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!("no reply within {}ms", CACHE_OP_TIMEOUT.as_millis()),
        };
        warn!("Repository cache {op} failed, bypassing: {failure}");
        // A caller already holding the slot is reconnecting anyway.
        if let Ok(mut slot) = self.conn.try_lock() {
            *slot = None;
        }
        None
    }

    async fn read_cached(&self, key: &str) -> Option<Vec<Repository>> {
        let raw = self
            .bounded("read", async {
                let mut conn = self.connection().await?;
                redis::cmd("GET")
                    .arg(key)
                    .query_async::<_, Option<String>>(&mut conn)
                    .await
            })
            .await??;

        match serde_json::from_str(&raw) {
            Ok(repos) => Some(repos),
            Err(e) => {
                warn!("Ignoring unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    async fn write_cached(&self, key: &str, repos: &[Repository]) {
        let json = match serde_json::to_string(repos) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize listing for cache: {e}");
                return;
            }
        };
        self.bounded("write", async {
            let mut conn = self.connection().await?;
            redis::cmd("SET")
                .arg(key)
                .arg(json)
                .arg("EX")
                .arg(self.ttl_secs)
                .query_async::<_, ()>(&mut conn)
                .await
        })
        .await;
    }
}

pub fn cache_key(username: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{}", username.to_ascii_lowercase())
}

#[async_trait]
impl RepoSource for CachedRepoSource {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, GitHubError> {
        let key = cache_key(username);

        if let Some(repos) = self.read_cached(&key).await {
            debug!("Repository listing cache hit for {username}");
            return Ok(repos);
        }

        let repos = self.inner.list_repos(username).await?;
        self.write_cached(&key, &repos).await;
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repo, FakeRepoSource};

    #[test]
    fn test_cache_key_is_case_insensitive() {
        assert_eq!(cache_key("OctoCat"), "devfolio:repos:octocat");
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_through_to_inner_source() {
        let inner = Arc::new(FakeRepoSource::returning(vec![repo(1, "alpha")]));
        // Nothing listens on port 9; every cache call errors.
        let redis = RedisClient::open("redis://127.0.0.1:9").unwrap();
        let cached = CachedRepoSource::new(inner.clone(), redis, 60);

        let repos = cached.list_repos("octocat").await.unwrap();
        assert_eq!(repos, vec![repo(1, "alpha")]);
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_inner_failure_is_propagated() {
        let inner = Arc::new(FakeRepoSource::failing());
        let redis = RedisClient::open("redis://127.0.0.1:9").unwrap();
        let cached = CachedRepoSource::new(inner, redis, 60);

        assert!(cached.list_repos("octocat").await.is_err());
    }

    #[tokio::test]
    async fn test_silent_redis_is_bypassed_within_timeout() {
        // Accepts connections and never writes a byte back.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let inner = Arc::new(FakeRepoSource::returning(vec![repo(1, "alpha")]));
        let redis = RedisClient::open(format!("redis://{addr}")).unwrap();
        let cached = CachedRepoSource::new(inner.clone(), redis, 60);

        let repos = tokio::time::timeout(Duration::from_secs(5), cached.list_repos("octocat"))
            .await
            .expect("listing must not wait on an unresponsive cache")
            .unwrap();
        assert_eq!(repos, vec![repo(1, "alpha")]);
        assert_eq!(inner.calls(), 1);
    }
}

//! Redis cache implementation.
//!
//! Scalar entries are plain string keys written with `SET EX`. Buckets are
//! Redis hashes: members are hash fields, the TTL lives on the hash key, and
//! dropping the bucket is a single `DEL`.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use hrdesk_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Unavailable` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

/// Redis TTLs are whole seconds; anything shorter rounds up to one.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// `EXPIRE` takes a signed count; TTLs past `i64::MAX` saturate instead of
/// wrapping negative, which would delete the key.
fn expire_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX)
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                conn.set_ex::<_, _, ()>(key, value, ttl_seconds(duration))
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn bucket_get(&self, bucket: &str, member: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.hget(bucket, member).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn bucket_put(&self, bucket: &str, member: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(bucket, member, value)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn bucket_expire(&self, bucket: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.expire::<_, ()>(bucket, expire_seconds(ttl))
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    /// `HSET` and `EXPIRE` in one `MULTI`/`EXEC` so a member never lands in a
    /// bucket without a TTL.
    async fn bucket_populate(
        &self,
        bucket: &str,
        member: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .hset(bucket, member, value)
            .ignore()
            .expire(bucket, expire_seconds(ttl))
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn bucket_delete(&self, bucket: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(bucket).await.map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        format!(
            "test:redis_cache:{}:{}:{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst),
            suffix
        )
    }

    #[test]
    fn test_ttl_seconds_rounds_up_to_one() {
        assert_eq!(ttl_seconds(Duration::from_millis(10)), 1);
        assert_eq!(ttl_seconds(Duration::from_secs(300)), 300);
    }

    #[test]
    fn test_expire_seconds_saturates_instead_of_wrapping() {
        assert_eq!(expire_seconds(Duration::from_secs(u64::MAX)), i64::MAX);
        assert_eq!(expire_seconds(Duration::from_secs(300)), 300);
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        let value = b"hello world";

        cache.set(&key, value, None).await.unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value.to_vec()));

        // Clean up
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("nonexistent");
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_redis_delete_is_idempotent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("delete");

        cache.set(&key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        cache.delete(&key).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());

        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");

        cache
            .set(&key, b"expiring value", Some(Duration::from_secs(1)))
            .await
            .unwrap();

        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_bucket_roundtrip_and_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let bucket = test_key("bucket");

        cache
            .bucket_populate(&bucket, "a", b"1", Duration::from_secs(60))
            .await
            .unwrap();
        cache.bucket_put(&bucket, "b", b"2").await.unwrap();

        assert_eq!(
            cache.bucket_get(&bucket, "a").await.unwrap(),
            Some(b"1".to_vec())
        );
        assert_eq!(
            cache.bucket_get(&bucket, "b").await.unwrap(),
            Some(b"2".to_vec())
        );

        cache.bucket_delete(&bucket).await.unwrap();

        assert!(cache.bucket_get(&bucket, "a").await.unwrap().is_none());
        assert!(cache.bucket_get(&bucket, "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_bucket_expires_as_a_whole() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let bucket = test_key("bucket_ttl");

        cache.bucket_put(&bucket, "a", b"1").await.unwrap();
        cache
            .bucket_populate(&bucket, "b", b"2", Duration::from_secs(1))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.bucket_get(&bucket, "a").await.unwrap().is_none());
        assert!(cache.bucket_get(&bucket, "b").await.unwrap().is_none());
    }
}

use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for cache store operations.
///
/// Scalar keys carry their own TTL. Buckets group members under one name and
/// share a single TTL; dropping a bucket drops all of its members at once.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL, overwriting any
    /// previous value and TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Gets one member of a bucket.
    async fn bucket_get(&self, bucket: &str, member: &str) -> Result<Option<Vec<u8>>>;

    /// Adds or overwrites one member of a bucket.
    async fn bucket_put(&self, bucket: &str, member: &str, value: &[u8]) -> Result<()>;

    /// Sets or resets the TTL of a whole bucket.
    async fn bucket_expire(&self, bucket: &str, ttl: Duration) -> Result<()>;

    /// Writes one member and resets the bucket TTL.
    ///
    /// Backends that can apply both steps atomically should override this.
    async fn bucket_populate(
        &self,
        bucket: &str,
        member: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<()> {
        self.bucket_put(bucket, member, value).await?;
        self.bucket_expire(bucket, ttl).await
    }

    /// Deletes a bucket and all of its members. Deleting a missing bucket
    /// succeeds.
    async fn bucket_delete(&self, bucket: &str) -> Result<()>;
}

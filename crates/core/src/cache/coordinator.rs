//! Read-through population and write invalidation on top of a [`Cache`].
//!
//! The coordinator holds no state of its own beyond the store handle and the
//! TTL. Every cache failure is recovered here: reads fall back to the source
//! of record, populates and invalidations are skipped with a warning.

use std::{future::Future, sync::Arc, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

use super::{
    serialization::{deserialize, serialize},
    Cache, CacheKey, CacheScope, Invalidation,
};

/// Read-through and write-invalidation over one cache store with a single TTL.
pub struct CacheCoordinator<C: Cache + ?Sized> {
    cache: Arc<C>,
    ttl: Duration,
}

impl<C: Cache + ?Sized> Clone for CacheCoordinator<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
        }
    }
}

impl<C: Cache + ?Sized> CacheCoordinator<C> {
    pub fn new(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Serves a single entity from cache, or fetches and caches it.
    ///
    /// `Ok(None)` from the fetch is passed through without caching, so an
    /// entity created later is visible immediately. Fetch errors propagate
    /// unchanged and are never cached.
    pub async fn read_through<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        fetch: F,
    ) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        if let Some(value) = self.lookup(key).await {
            return Ok(Some(value));
        }

        let fetched = fetch().await?;
        if let Some(value) = &fetched {
            self.populate(key, value).await;
        }
        Ok(fetched)
    }

    /// Serves a collection from cache, or fetches and caches it.
    ///
    /// Empty results are cached like any other.
    pub async fn read_through_all<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        fetch: F,
    ) -> Result<Vec<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(values) = self.lookup(key).await {
            return Ok(values);
        }

        let fetched = fetch().await?;
        self.populate(key, &fetched).await;
        Ok(fetched)
    }

    /// Applies invalidations in order. Failures are logged and skipped.
    pub async fn invalidate(&self, invalidations: &[Invalidation]) {
        for invalidation in invalidations {
            let (entry, result) = match invalidation {
                Invalidation::Key(key) => (key, self.cache.delete(key).await),
                Invalidation::Bucket(bucket) => (bucket, self.cache.bucket_delete(bucket).await),
            };
            match result {
                Ok(()) => tracing::debug!(entry = %entry, "Cache invalidated"),
                Err(e) => {
                    tracing::warn!(entry = %entry, error = %e, "Failed to invalidate cache")
                }
            }
        }
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let result = match key.scope() {
            CacheScope::Entity => self.cache.get(key.as_str()).await,
            CacheScope::Collection { bucket } => {
                self.cache.bucket_get(bucket, key.as_str()).await
            }
        };

        let bytes = match result {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::trace!(key = %key, "Cache miss");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed");
                return None;
            }
        };

        match deserialize(&bytes) {
            Ok(value) => {
                tracing::trace!(key = %key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    async fn populate<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) {
        let bytes = match serialize(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to encode value for cache");
                return;
            }
        };

        let result = match key.scope() {
            CacheScope::Entity => self.cache.set(key.as_str(), &bytes, Some(self.ttl)).await,
            CacheScope::Collection { bucket } => {
                self.cache
                    .bucket_populate(bucket, key.as_str(), &bytes, self.ttl)
                    .await
            }
        };

        if let Err(e) = result {
            tracing::warn!(key = %key, error = %e, "Failed to populate cache");
        }
    }
}

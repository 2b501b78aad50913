//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! Buckets mirror Redis hashes: a member write on a missing or expired bucket
//! starts a fresh bucket without TTL, and `bucket_expire` on a missing bucket
//! is a no-op.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use hrdesk_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.and_then(deadline);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Expiry instant for a TTL, or `None` when the TTL overflows the clock and
/// the entry never expires.
fn deadline(ttl: Duration) -> Option<Instant> {
    Instant::now().checked_add(ttl)
}

/// A named group of members sharing one expiry.
#[derive(Debug, Default)]
struct Bucket {
    members: HashMap<String, Vec<u8>>,
    expires_at: Option<Instant>,
}

impl Bucket {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are cleaned up on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
///
/// Buckets live beside the scalar store and are bounded by their TTL rather
/// than by LRU eviction.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    /// Scalar key-value store with LRU eviction.
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Buckets by name.
    buckets: Arc<RwLock<HashMap<String, Bucket>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// `max_entries` is the number of scalar entries kept before the least
    /// recently used one is evicted. Zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn bucket_get(&self, bucket: &str, member: &str) -> Result<Option<Vec<u8>>> {
        let mut buckets = self.buckets.write().await;

        match buckets.get(bucket) {
            Some(b) if b.is_expired() => {
                buckets.remove(bucket);
                Ok(None)
            }
            Some(b) => Ok(b.members.get(member).cloned()),
            None => Ok(None),
        }
    }

    async fn bucket_put(&self, bucket: &str, member: &str, value: &[u8]) -> Result<()> {
        let mut buckets = self.buckets.write().await;

        let entry = buckets.entry(bucket.to_string()).or_default();
        if entry.is_expired() {
            *entry = Bucket::default();
        }
        entry.members.insert(member.to_string(), value.to_vec());

        Ok(())
    }

    async fn bucket_expire(&self, bucket: &str, ttl: Duration) -> Result<()> {
        let mut buckets = self.buckets.write().await;

        if let Some(b) = buckets.get_mut(bucket) {
            b.expires_at = deadline(ttl);
        }

        Ok(())
    }

    async fn bucket_delete(&self, bucket: &str) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        buckets.remove(bucket);
        Ok(())
    }
}

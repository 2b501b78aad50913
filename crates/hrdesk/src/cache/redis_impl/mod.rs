//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments.
//! Scalars map to plain string keys, buckets map to Redis hashes.

mod cache;
mod error;

pub use cache::RedisCache;

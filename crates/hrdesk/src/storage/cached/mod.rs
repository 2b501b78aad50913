//! Cached repository decorators.
//!
//! This module provides decorator implementations that wrap repository traits
//! with caching behavior:
//!
//! - **Reads**: Served through the [`CacheCoordinator`], which checks the cache
//!   first and on a miss fetches from the repository and populates the cache
//! - **Writes**: Persist to the repository, then invalidate the affected keys
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(SqliteRepository::new("hrdesk.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//! let coordinator = CacheCoordinator::new(cache, Duration::from_secs(300));
//!
//! let employees = CachedEmployeeRepository::new(repo, coordinator, CacheKeys::new("hrdesk"));
//! ```
//!
//! [`CacheCoordinator`]: hrdesk_core::cache::CacheCoordinator

mod employee;
mod vacation;

pub use employee::CachedEmployeeRepository;
pub use vacation::CachedVacationRepository;

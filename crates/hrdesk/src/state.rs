use std::sync::Arc;

use hrdesk_core::cache::{Cache, CacheCoordinator, CacheKeys};
use hrdesk_core::storage::{EmployeeRepository, VacationRepository};

use crate::config::Config;
use crate::storage::{CachedEmployeeRepository, CachedVacationRepository};

// ============================================================================
// Feature flag validation
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared handler state.
///
/// Handlers only see the repository traits; the cached decorators behind
/// them are chosen once at startup.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeRepository>,
    pub vacations: Arc<dyn VacationRepository>,
}

impl AppState {
    /// Wraps one source-of-record repository and one cache store in the
    /// cached decorators.
    fn build<R, C>(repository: Arc<R>, cache: Arc<C>, config: &Config) -> Self
    where
        R: EmployeeRepository + VacationRepository + 'static,
        C: Cache + 'static,
    {
        let coordinator = CacheCoordinator::new(cache, config.cache_ttl());
        let keys = CacheKeys::new(config.cache_namespace.clone());

        tracing::debug!(
            namespace = %keys.namespace(),
            ttl_seconds = config.cache_ttl_seconds,
            "Cache coordinator ready"
        );

        Self {
            employees: Arc::new(CachedEmployeeRepository::new(
                Arc::clone(&repository),
                coordinator.clone(),
                keys.clone(),
            )),
            vacations: Arc::new(CachedVacationRepository::new(repository, coordinator, keys)),
        }
    }
}

// ============================================================================
// Feature-specific factory functions
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage with memory cache");

            Ok(Self::build(sqlite_repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage with Redis cache");

            Ok(Self::build(sqlite_repo, redis_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!("Using in-memory storage with memory cache");

            Ok(Self::build(inmemory_repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            tracing::info!("Using in-memory storage with Redis cache");

            Ok(Self::build(inmemory_repo, redis_cache, config))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `hrdesk_core::storage`, plus the cached decorators that sit in
//! front of them. The source-of-record backend is selected at compile time
//! via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local maps, lost on restart
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p hrdesk --no-default-features --features sqlite,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p hrdesk --features sqlite"
);

pub mod cached;

// The in-memory backend also backs unit tests under every feature set.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::{CachedEmployeeRepository, CachedVacationRepository};

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

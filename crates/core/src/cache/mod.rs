mod coordinator;
mod error;
mod keys;
mod serialization;
mod traits;

pub use coordinator::CacheCoordinator;
pub use error::{CacheError, Result};
pub use keys::{CacheKey, CacheKeys, CacheScope, Invalidation};
pub use serialization::{deserialize, serialize, SerializationError};
pub use traits::Cache;

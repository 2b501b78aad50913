//! Redis error mapping to CacheError.

use hrdesk_core::cache::CacheError;

/// Maps Redis errors to CacheError.
///
/// Every Redis failure, whether the connection dropped or a command was
/// rejected, leaves the store unusable for this call and maps to
/// `Unavailable`. Connection-level failures only get a `connection:` prefix
/// in the message so logs tell them apart from rejected commands.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    let is_connection =
        err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped();
    let message = if is_connection {
        format!("connection: {err}")
    } else {
        err.to_string()
    };
    CacheError::Unavailable(message)
}

//! Functional core for hrdesk.
//!
//! Pure domain types, cache key derivation, and the trait seams
//! (cache store, repositories) that the server crate implements.

pub mod cache;
pub mod serde;
pub mod staff;
pub mod storage;

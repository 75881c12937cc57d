//! Mini-App Client Module
//!
//! The client side of the boundary:
//! - `cache/` - origin-scoped TTL cache over a pluggable store
//! - `client` - gateway client that caches read-mostly resources
//!
//! Caching is best-effort: a broken or full store degrades to uncached calls.

pub mod cache;
pub mod client;
pub mod error;

pub use cache::{CacheEntry, CacheStore, FileStore, MemoryStore, TtlCache};
pub use client::{ClientConfig, GatewayClient};
pub use error::{CacheError, ClientError, ClientResult};

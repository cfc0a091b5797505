//! Eviction policies.
//!
//! | Policy | Evicts | Ordering structure |
//! |--------|--------|--------------------|
//! | [`lru`] | least recently used | [`RecencyList`](crate::ds::RecencyList) |
//! | [`lfu`] | least frequently used | [`FrequencyBuckets`](crate::ds::FrequencyBuckets) |
//! | [`ttl`] | past-deadline on sweep | [`ExpiryQueue`](crate::ds::ExpiryQueue) |
//!
//! Each policy comes as a single-threaded core plus a `Concurrent*`
//! wrapper sharing the core behind an `Arc<parking_lot::RwLock<..>>`.

pub mod lfu;
pub mod lru;
pub mod ttl;

pub use lfu::{ConcurrentLfuCache, LfuCache};
pub use lru::{ConcurrentLruCache, LruCache};
pub use ttl::{ConcurrentTtlCache, TtlCache};

//! evictkit: bounded in-memory key-value caches with pluggable eviction.
//!
//! Three eviction disciplines with O(1) amortized `get`/`insert`:
//!
//! - [`policy::lru::LruCache`]: least-recently-used eviction.
//! - [`policy::lfu::LfuCache`]: least-frequently-used eviction with LRU
//!   tie-breaking inside each frequency class.
//! - [`policy::ttl::TtlCache`]: time-to-live expiration driven by an
//!   externally scheduled sweep.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

//! Convenience re-exports for common usage.
//!
//! ```rust
//! use evictkit::prelude::*;
//! ```

pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::error::ConfigError;
pub use crate::policy::lfu::{ConcurrentLfuCache, LfuCache};
pub use crate::policy::lru::{ConcurrentLruCache, LruCache};
pub use crate::policy::ttl::{ConcurrentTtlCache, TtlCache};
pub use crate::traits::{CoreCache, ExpiringCache, LfuCacheTrait, LruCacheTrait, MutableCache};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LfuMetricsSnapshot, LruMetricsSnapshot, TtlMetricsSnapshot};

//! Storage backends.
//!
//! Policies keep eviction metadata; stores own the actual key/value pairs
//! and the entry-count bound.

pub mod hashmap;
pub mod traits;

pub use hashmap::HashMapStore;
pub use traits::{StoreCore, StoreFull, StoreMetrics, StoreMut};

//! Unified cache builder for the capacity-bounded policies.
//!
//! Provides a simple API to create caches with different eviction policies
//! while hiding the internal implementation details (like `Arc<V>`
//! wrapping). The TTL policy is not buildable here: it has no entry-count
//! capacity and a timestamp-carrying API of its own.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction with LRU tie-breaking.
    Lfu,
}

/// Unified cache wrapper that provides a consistent API regardless of
/// policy. Values go in and come out as plain `V`; the `Arc<V>` wrapping
/// the policies use internally stays hidden.
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

fn unwrap_arc<V: Clone>(arc: Arc<V>) -> V {
    Arc::try_unwrap(arc).unwrap_or_else(|arc| (*arc).clone())
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Insert a key-value pair. Returns the previous value if the key
    /// existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let arc_value = Arc::new(value);
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.insert(key, arc_value).map(unwrap_arc),
            CacheInner::Lfu(lfu) => lfu.insert(key, arc_value).map(unwrap_arc),
        }
    }

    /// Get a reference to a value by key, registering the access with the
    /// policy.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key).map(|arc| arc.as_ref()),
            CacheInner::Lfu(lfu) => lfu.get(key).map(|arc| arc.as_ref()),
        }
    }

    /// Remove an entry by key.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key).map(unwrap_arc),
            CacheInner::Lfu(lfu) => lfu.remove(key).map(unwrap_arc),
        }
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the maximum capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }
}

/// Builder for creating cache instances.
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the builder's capacity is zero. Use
    /// [`try_build`](Self::try_build) to handle user-configurable
    /// capacities.
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("CacheBuilder::build: {err}"),
        }
    }

    /// Build a cache with the specified policy, rejecting invalid
    /// configuration.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(self.capacity)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::try_new(self.capacity)?),
        };
        Ok(Cache { inner })
    }
}

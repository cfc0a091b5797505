//! Cross-policy behavioral tests: eviction ordering, capacity bounds, and
//! expiration semantics under realistic interleavings.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::policy::lfu::{ConcurrentLfuCache, LfuCache};
use evictkit::policy::lru::{ConcurrentLruCache, LruCache};
use evictkit::policy::ttl::{ConcurrentTtlCache, TtlCache};
use evictkit::traits::{CoreCache, ExpiringCache, LfuCacheTrait, LruCacheTrait, MutableCache};

// ---------------------------------------------------------------------------
// LRU
// ---------------------------------------------------------------------------

#[test]
fn lru_access_refreshes_eviction_order() {
    let mut cache = LruCache::new(2);
    cache.insert("a", Arc::new(1));
    cache.insert("b", Arc::new(2));
    cache.get(&"a");
    cache.insert("c", Arc::new(3));

    assert!(cache.contains(&"a"));
    assert!(!cache.contains(&"b"));
    assert!(cache.contains(&"c"));
}

#[test]
fn lru_update_counts_as_use() {
    let mut cache = LruCache::new(2);
    cache.insert(1u64, Arc::new("a"));
    cache.insert(2u64, Arc::new("b"));
    cache.insert(1u64, Arc::new("a2"));
    cache.insert(3u64, Arc::new("c"));

    assert!(cache.contains(&1));
    assert!(!cache.contains(&2));
}

#[test]
fn lru_capacity_holds_under_random_workload() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut cache = LruCache::new(32);

    for _ in 0..5_000 {
        let key = rng.gen_range(0u64..100);
        match rng.gen_range(0u8..4) {
            0 => {
                cache.insert(key, Arc::new(key));
            },
            1 => {
                cache.get(&key);
            },
            2 => {
                cache.touch(&key);
            },
            _ => {
                cache.remove(&key);
            },
        }
        assert!(cache.len() <= 32);
    }
    cache.check_invariants().unwrap();
}

#[test]
fn lru_repeated_misses_leave_state_untouched() {
    let mut cache = LruCache::new(4);
    cache.insert(1u64, Arc::new("a"));
    cache.insert(2u64, Arc::new("b"));

    for _ in 0..5 {
        assert_eq!(cache.get(&99), None);
    }
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.recency_rank(&2), Some(0));
    cache.check_invariants().unwrap();

    #[cfg(feature = "metrics")]
    {
        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_misses, 5);
        assert_eq!(snap.get_hits, 0);
        assert_eq!(snap.evicted_entries, 0);
    }
}

#[test]
fn lru_pop_order_matches_recency_ranks() {
    let mut cache = LruCache::new(4);
    for key in 0u64..4 {
        cache.insert(key, Arc::new(key));
    }
    cache.get(&0);
    cache.get(&2);

    // Recency now (MRU..LRU): 2, 0, 3, 1.
    assert_eq!(cache.recency_rank(&2), Some(0));
    assert_eq!(cache.recency_rank(&1), Some(3));

    let drained: Vec<u64> = std::iter::from_fn(|| cache.pop_lru().map(|(k, _)| k)).collect();
    assert_eq!(drained, vec![1, 3, 0, 2]);
}

// ---------------------------------------------------------------------------
// LFU
// ---------------------------------------------------------------------------

#[test]
fn lfu_evicts_minimum_frequency() {
    let mut cache = LfuCache::new(2);
    cache.insert("hot", Arc::new(1));
    cache.insert("cold", Arc::new(2));
    cache.get(&"hot");
    cache.get(&"hot");
    cache.insert("new", Arc::new(3));

    assert!(cache.contains(&"hot"));
    assert!(!cache.contains(&"cold"));
    assert_eq!(cache.frequency(&"hot"), Some(3));
    assert_eq!(cache.frequency(&"new"), Some(1));
}

#[test]
fn lfu_ties_evict_least_recently_touched() {
    let mut cache = LfuCache::new(3);
    cache.insert("a", Arc::new(1));
    cache.insert("b", Arc::new(2));
    cache.insert("c", Arc::new(3));

    // Equal frequencies: "a" is the stalest and goes first.
    cache.insert("d", Arc::new(4));
    assert!(!cache.contains(&"a"));

    // Touch "b"; "c" becomes the stalest key at the minimum frequency.
    cache.get(&"b");
    cache.insert("e", Arc::new(5));
    assert!(!cache.contains(&"c"));
    assert!(cache.contains(&"b"));
    assert!(cache.contains(&"d"));
}

#[test]
fn lfu_new_key_cannot_displace_accessed_keys() {
    let mut cache = LfuCache::new(2);
    cache.insert(1u64, Arc::new("a"));
    cache.insert(2u64, Arc::new("b"));
    cache.get(&1);
    cache.get(&2);

    // Each fresh key arrives at frequency 1 and is immediately the
    // minimum, so churning inserts only replace each other.
    for key in 10u64..20 {
        cache.insert(key, Arc::new("churn"));
        assert!(cache.contains(&1));
        assert!(cache.contains(&2));
    }
}

#[test]
fn lfu_repeated_misses_leave_state_untouched() {
    let mut cache = LfuCache::new(4);
    cache.insert(1u64, Arc::new("a"));
    cache.get(&1);

    for _ in 0..5 {
        assert_eq!(cache.get(&99), None);
    }
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.frequency(&1), Some(2));
    cache.check_invariants().unwrap();

    #[cfg(feature = "metrics")]
    {
        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_misses, 5);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.evicted_entries, 0);
    }
}

#[test]
fn lfu_capacity_holds_under_random_workload() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut cache = LfuCache::new(16);

    for _ in 0..5_000 {
        let key = rng.gen_range(0u64..64);
        match rng.gen_range(0u8..4) {
            0 => {
                cache.insert(key, Arc::new(key));
            },
            1 => {
                cache.get(&key);
            },
            2 => {
                cache.increment_frequency(&key);
            },
            _ => {
                cache.remove(&key);
            },
        }
        assert!(cache.len() <= 16);
    }
    cache.check_invariants().unwrap();
}

// ---------------------------------------------------------------------------
// TTL
// ---------------------------------------------------------------------------

#[test]
fn ttl_expiry_is_sweep_driven_not_read_driven() {
    let mut cache = TtlCache::new();
    cache.set_at("k", Arc::new(1), 10, 1_000);

    // Reads past the deadline keep returning the value until a sweep runs.
    for now in [1_010u64, 1_100, 9_999] {
        assert_eq!(cache.ttl_remaining(&"k", now), Some(0));
        assert_eq!(cache.get(&"k").map(|v| *v), Some(1));
    }

    assert_eq!(cache.sweep(1_010), 1);
    assert_eq!(cache.get(&"k"), None);
}

#[test]
fn ttl_reschedule_outlives_original_deadline() {
    let mut cache = TtlCache::new();
    cache.set_at("session", Arc::new("v1"), 10, 100);
    cache.set_at("session", Arc::new("v2"), 200, 100);

    assert_eq!(cache.sweep(110), 0);
    assert_eq!(cache.get(&"session").map(|v| *v), Some("v2"));
    assert_eq!(cache.sweep(300), 1);
    assert!(cache.is_empty());
}

#[test]
fn ttl_sweep_handles_mixed_deadlines() {
    let mut cache = TtlCache::new();
    for key in 0u64..10 {
        cache.set_at(key, Arc::new(key), key * 10, 0);
    }

    // Deadlines are 0, 10, .., 90; t=45 covers the first five.
    assert_eq!(cache.sweep(45), 5);
    assert_eq!(cache.len(), 5);
    for key in 0u64..5 {
        assert!(!cache.contains(&key));
    }
    for key in 5u64..10 {
        assert!(cache.contains(&key));
    }
}

#[test]
fn ttl_removed_keys_never_resurface_in_sweeps() {
    let mut cache = TtlCache::new();
    cache.set_at("a", Arc::new(1), 10, 0);
    cache.set_at("b", Arc::new(2), 10, 0);
    cache.remove(&"a");

    assert_eq!(cache.sweep(10), 1);
    assert!(cache.is_empty());
    cache.check_invariants().unwrap();
}

#[test]
fn ttl_repeated_misses_leave_state_untouched() {
    let mut cache = TtlCache::new();
    cache.set_at("k", Arc::new(1), 10, 0);

    for _ in 0..5 {
        assert_eq!(cache.get(&"absent"), None);
    }
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.expires_at(&"k"), Some(10));
    assert_eq!(cache.pending_deadlines(), 1);
    cache.check_invariants().unwrap();

    #[cfg(feature = "metrics")]
    {
        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_misses, 5);
        assert_eq!(snap.get_hits, 0);
        assert_eq!(snap.expired_entries, 0);
    }
}

#[test]
fn ttl_random_schedule_and_sweep_stays_consistent() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut cache = TtlCache::new();
    let mut now = 0u64;

    for _ in 0..2_000 {
        let key = rng.gen_range(0u64..50);
        match rng.gen_range(0u8..4) {
            0 | 1 => {
                let ttl = rng.gen_range(1u64..30);
                cache.set_at(key, Arc::new(key), ttl, now);
            },
            2 => {
                cache.remove(&key);
            },
            _ => {
                now += rng.gen_range(0u64..10);
                cache.sweep(now);
            },
        }
        cache.check_invariants().unwrap();
    }

    // A final far-future sweep drains everything.
    cache.sweep(u64::MAX);
    assert!(cache.is_empty());
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn builder_policies_diverge_on_access_pattern() {
    // Same insert/get sequence, different survivor sets.
    let mut lru = CacheBuilder::new(2).build::<u64, u64>(CachePolicy::Lru);
    let mut lfu = CacheBuilder::new(2).build::<u64, u64>(CachePolicy::Lfu);

    for cache in [&mut lru, &mut lfu] {
        cache.insert(1, 10);
        cache.get(&1);
        cache.get(&1);
        cache.insert(2, 20);
        cache.get(&2);
        // Key 1: freq 3, older recency. Key 2: freq 2, newer recency.
        cache.insert(3, 30);
    }

    // LRU drops the stalest key (1); LFU drops the lower-frequency key (2).
    assert!(!lru.contains(&1));
    assert!(lru.contains(&2));
    assert!(lfu.contains(&1));
    assert!(!lfu.contains(&2));
}

// ---------------------------------------------------------------------------
// Concurrent wrappers
// ---------------------------------------------------------------------------

#[test]
fn concurrent_lru_parallel_churn_respects_capacity() {
    let cache = ConcurrentLruCache::new(64);
    let mut workers = Vec::new();
    for t in 0u64..8 {
        let handle = cache.clone();
        workers.push(std::thread::spawn(move || {
            for i in 0..500 {
                handle.insert(t * 10_000 + i, i);
                if i % 3 == 0 {
                    handle.get(&(t * 10_000));
                }
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }
    assert!(cache.len() <= 64);
}

#[test]
fn concurrent_lfu_frequency_survives_sharing() {
    let cache = ConcurrentLfuCache::new(8);
    cache.insert("shared", 0u64);

    let mut workers = Vec::new();
    for _ in 0..4 {
        let handle = cache.clone();
        workers.push(std::thread::spawn(move || {
            for _ in 0..25 {
                handle.get(&"shared");
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    // 1 from insert + 100 gets.
    assert_eq!(cache.frequency(&"shared"), Some(101));
}

#[test]
fn concurrent_ttl_sweeper_thread_drains_expired() {
    let cache = ConcurrentTtlCache::new();
    for key in 0u64..200 {
        cache.set_at(key, key, key % 20, 0);
    }

    let sweeper = cache.clone();
    let worker = std::thread::spawn(move || {
        let mut total = 0;
        for now in 0u64..20 {
            total += sweeper.sweep(now);
        }
        total
    });

    let expired = worker.join().unwrap();
    assert_eq!(expired, 200);
    assert!(cache.is_empty());
}

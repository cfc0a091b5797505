use std::sync::Arc;

use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{CoreCache, LfuCacheTrait};

fn main() {
    let mut cache: LfuCache<u32, String> = LfuCache::new(2);

    cache.insert(1, Arc::new("alpha".to_string()));
    cache.insert(2, Arc::new("beta".to_string()));

    cache.get(&1);
    cache.get(&1);

    cache.insert(3, Arc::new("gamma".to_string()));

    println!("contains 2? {}", cache.contains(&2));
    println!("frequency 1: {:?}", cache.frequency(&1));
}

// Expected output:
// contains 2? false
// frequency 1: Some(3)
//
// Explanation: capacity=2; key 1 is at frequency 3 (insert + two gets)
// while key 2 stayed at 1. Inserting key 3 evicts the minimum-frequency
// key 2.

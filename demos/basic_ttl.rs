use std::sync::Arc;

use evictkit::policy::ttl::TtlCache;
use evictkit::traits::ExpiringCache;

fn main() {
    let mut cache: TtlCache<u32, String> = TtlCache::new();

    // Simulated clock: entry 1 lives 10 ticks, entry 2 lives 60.
    cache.set_at(1, Arc::new("short".to_string()), 10, 100);
    cache.set_at(2, Arc::new("long".to_string()), 60, 100);

    // Past entry 1's deadline, but no sweep has run yet.
    println!("before sweep, get 1: {:?}", cache.get(&1).map(|v| (*v).clone()));

    let expired = cache.sweep(120);
    println!("sweep(120) expired: {expired}");
    println!("after sweep, get 1: {:?}", cache.get(&1).map(|v| (*v).clone()));
    println!("after sweep, get 2: {:?}", cache.get(&2).map(|v| (*v).clone()));
}

// Expected output:
// before sweep, get 1: Some("short")
// sweep(120) expired: 1
// after sweep, get 1: None
// after sweep, get 2: Some("long")
//
// Explanation: expiration is sweep-driven. Entry 1's deadline is t=110,
// but it stays visible until sweep(120) removes it. Entry 2's deadline is
// t=160, so it survives.

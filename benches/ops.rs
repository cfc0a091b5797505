//! Benchmarks for the three eviction policies.
//!
//! Run with: `cargo bench --bench ops`

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::ttl::TtlCache;
use evictkit::traits::{CoreCache, ExpiringCache};

const CAPACITY: usize = 1024;

// ============================================================================
// Insert + Get benchmarks (mixed operations)
// ============================================================================

fn bench_lru_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_policy");
    let ops_per_iter = CAPACITY as u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));

    group.bench_function("insert_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.insert(black_box(i + 10_000), Arc::new(i));
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_lfu_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_policy");
    let ops_per_iter = CAPACITY as u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));

    group.bench_function("insert_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.insert(black_box(i + 10_000), Arc::new(i));
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Eviction churn benchmarks (continuous eviction pressure)
// ============================================================================

fn bench_lru_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_policy");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_lfu_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_policy");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(42);
                let mut cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, Arc::new(i));
                    // Skewed access counts so the bucket chain has depth.
                    for _ in 0..rng.gen_range(0u32..8) {
                        cache.get(&i);
                    }
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// TTL benchmarks (scheduling and sweep throughput)
// ============================================================================

fn bench_ttl_set_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("ttl_policy");
    let ops_per_iter = CAPACITY as u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));

    group.bench_function("set_get", |b| {
        b.iter_batched(
            TtlCache::new,
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.set_at(black_box(i), Arc::new(i), 60, i);
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_ttl_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("ttl_policy");
    group.throughput(Throughput::Elements(CAPACITY as u64));

    group.bench_function("sweep_all_due", |b| {
        b.iter_batched(
            || {
                let mut cache = TtlCache::new();
                for i in 0..CAPACITY as u64 {
                    cache.set_at(i, Arc::new(i), i % 100, 0);
                }
                cache
            },
            |mut cache| {
                black_box(cache.sweep(black_box(100)));
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lfu_insert_get,
    bench_lru_eviction_churn,
    bench_lfu_eviction_churn,
    bench_ttl_set_get,
    bench_ttl_sweep,
);
criterion_main!(benches);

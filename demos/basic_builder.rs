//! Choosing the eviction policy at runtime with `CacheBuilder`.
//!
//! Run with: cargo run --example basic_builder

use boundcache::builder::{CacheBuilder, CachePolicy};
use boundcache::config::CacheConfig;
use boundcache::traits::{CoreCache, ReadOnlyCache};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    for policy in [CachePolicy::Lru, CachePolicy::Lfu] {
        println!("{policy}:");
        let mut cache = CacheBuilder::new(3).build::<u64, String>(policy);

        cache.insert(1, "one".to_string());
        cache.insert(2, "two".to_string());
        cache.insert(3, "three".to_string());

        // 1 is read twice, 2 once
        cache.get(&1);
        cache.get(&1);
        cache.get(&2);

        cache.insert(4, "four".to_string());
        println!("   contains 3? {}", cache.contains(&3));
        println!("   eviction order: {:?}", cache.keys());
        println!("   frequency(1) = {}", cache.frequency(&1));
    }

    // Capacities from untrusted input go through the fallible path.
    match CacheConfig::try_from(-5i64) {
        Ok(config) => println!("unexpected config {config:?}"),
        Err(e) => println!("rejected: {e}"),
    }
    if let Err(e) = CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lfu) {
        println!("rejected: {e}");
    }
}

// Expected output:
// lru:
//    contains 3? false
//    eviction order: [1, 2, 4]
//    frequency(1) = 0
// lfu:
//    contains 3? false
//    eviction order: [4, 2, 1]
//    frequency(1) = 3
// rejected: invalid cache config: capacity must be greater than zero, got -5
// rejected: invalid cache config: capacity must be greater than zero, got 0

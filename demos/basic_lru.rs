//! Run with: RUST_LOG=boundcache=trace cargo run --example basic_lru

use boundcache::policy::lru::LruCache;
use boundcache::traits::{CoreCache, LruCacheTrait, ReadOnlyCache};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut cache: LruCache<u32, &str> = LruCache::new(2);

    cache.insert(1, "a");
    cache.insert(2, "b");
    cache.get(&1);
    cache.insert(3, "c");

    println!("get(2) = {:?}", cache.get(&2));
    println!("get(1) = {:?}", cache.get(&1));
    println!("get(3) = {:?}", cache.get(&3));
    println!("keys (least recent first) = {:?}", cache.keys());
    println!("next victim = {:?}", cache.peek_lru());
    println!("len = {}, full = {}", cache.len(), cache.is_full());
}

// Expected output:
// get(2) = None
// get(1) = Some("a")
// get(3) = Some("c")
// keys (least recent first) = [1, 3]
// next victim = Some((1, "a"))
// len = 2, full = true
//
// Key 1 is read before 3 arrives, so 2 is the least recent entry and is evicted.

//! Run with: RUST_LOG=boundcache=trace cargo run --example basic_lfu

use boundcache::policy::lfu::LfuCache;
use boundcache::traits::{CoreCache, LfuCacheTrait, MutableCache, ReadOnlyCache};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut cache: LfuCache<&str, String> = LfuCache::new(2);

    cache.insert("a", "alpha".to_string());
    cache.insert("b", "beta".to_string());

    cache.get(&"a");
    cache.insert("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("frequency(a) = {}", cache.frequency(&"a"));
    println!("frequency(c) = {}", cache.frequency(&"c"));

    // equal counts: the older entry goes first
    cache.remove(&"a");
    cache.insert("d", "delta".to_string());
    cache.insert("e", "epsilon".to_string());
    println!("after tie: {:?}", cache.keys());
}

// Expected output:
// contains a? true
// contains b? false
// frequency(a) = 2
// frequency(c) = 1
// after tie: ["d", "e"]
//
// "a" has count 2 when "c" arrives, so "b" (count 1) is evicted. Later "c"
// and "d" share count 1 and "c" is older, so it is evicted for "e".

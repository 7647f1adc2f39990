//! boundcache: capacity-bounded LRU and LFU caches.
//!
//! Both engines keep a fixed maximum number of entries and evict one entry
//! when a new key arrives at a full cache. Lookups, inserts and removals are
//! O(1): a hash index maps keys to arena slots, and the slots are linked into
//! a recency list (LRU) or into per-count frequency buckets (LFU).
//!
//! ```
//! use boundcache::prelude::*;
//!
//! let mut lru = LruCache::new(2);
//! lru.insert("a", 1);
//! lru.insert("b", 2);
//! lru.get(&"a");
//! lru.insert("c", 3);
//! assert_eq!(lru.keys(), vec!["a", "c"]);
//!
//! let mut lfu = CacheBuilder::new(2).build::<&str, i32>(CachePolicy::Lfu);
//! lfu.insert("a", 1);
//! lfu.get(&"a");
//! assert_eq!(lfu.frequency(&"a"), 2);
//!
//! assert!(LruCache::<u8, u8>::try_new(0).is_err());
//! ```
//!
//! Cargo features:
//! - `metrics`: per-cache operation counters and snapshots.
//! - `concurrency`: `ConcurrentLruCache` / `ConcurrentLfuCache`, lock-protected
//!   shareable wrappers built on `parking_lot`.

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

//! # LFU (Least Frequently Used) Cache
//!
//! Bounded cache that evicts the entry with the lowest access count. When
//! several entries share that count, the one touched longest ago goes first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>                                        │
//!   │                                                                      │
//!   │   buckets: FrequencyBuckets<Entry<K, V>>                             │
//!   │                                                                      │
//!   │     min_freq ─► freq=1: [d] ◄──► [b]      (b evicted first)          │
//!   │                   │                                                  │
//!   │                 freq=2: [c]                                          │
//!   │                   │                                                  │
//!   │                 freq=5: [a]                                          │
//!   │                                                                      │
//!   │   Inside a bucket the head is the most recently touched entry.       │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Counting rules
//!
//! | Event                     | Count          | Position in bucket |
//! |---------------------------|----------------|--------------------|
//! | insert of a new key       | 1              | most recent        |
//! | `get` hit                 | +1             | most recent        |
//! | insert of an existing key | +1, value swap | most recent        |
//! | `peek`, `frequency`, ...  | unchanged      | unchanged          |
//!
//! Counts saturate at `u64::MAX`; further touches only refresh recency.
//! Removing a key forgets its count, so a later insert starts again at 1.
//!
//! ## LFU vs LRU
//!
//! ```text
//!   Access pattern: A, B, A, C, A, D  (capacity 3)
//!
//!   LRU:  after D → [C, A, D]   B evicted (least recent)
//!   LFU:  after D → {A:3, C:1, D:1}   B evicted (count 1, oldest touch)
//!
//!   A keeps surviving under LFU while its count stays ahead.
//! ```
//!
//! ## Example
//!
//! ```
//! use boundcache::policy::lfu::LfuCache;
//! use boundcache::traits::{CoreCache, LfuCacheTrait, ReadOnlyCache};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//!
//! cache.insert("c", 3);
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.frequency(&"a"), 2);
//! assert_eq!(cache.frequency(&"c"), 1);
//! assert_eq!(cache.keys(), vec!["c", "a"]);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe on its own; use a `Mutex` or the `concurrency` feature's
//! [`ConcurrentLfuCache`].

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::config::CacheConfig;
use crate::ds::{FrequencyBuckets, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache, ReadOnlyCache};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Bounded LFU cache with O(1) `get`, `insert`, `remove` and eviction.
pub struct LfuCache<K, V> {
    index: FxHashMap<K, SlotId>,
    buckets: FrequencyBuckets<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::from_config(CacheConfig::new(capacity))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn from_config(config: CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let reserve = config.prealloc_len();
        let mut index = FxHashMap::default();
        index.reserve(reserve);
        Ok(Self {
            index,
            buckets: FrequencyBuckets::with_capacity(reserve),
            capacity: config.capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        })
    }

    /// Reads a value without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.buckets.get(id).map(|entry| &entry.value)
    }

    /// Keys in eviction order: the key `pop_lfu` would return comes first.
    pub fn keys(&self) -> Vec<K> {
        self.buckets
            .iter()
            .map(|(entry, _)| entry.key.clone())
            .collect()
    }

    /// Values in eviction order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.buckets
            .iter()
            .map(|(entry, _)| entry.value.clone())
            .collect()
    }

    /// Borrowing iterator over `(key, value, count)` in eviction order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, u64)> {
        self.buckets
            .iter()
            .map(|(entry, freq)| (&entry.key, &entry.value, freq))
    }

    /// Lowest access count currently present.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }

    /// Checks that the index and the frequency buckets agree.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant as an [`InvariantError`].
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.validate().map_err(InvariantError::new)?;
        if self.index.len() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but buckets hold {} entries",
                self.index.len(),
                self.buckets.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            let Some(entry) = self.buckets.get(id) else {
                return Err(InvariantError::new(format!(
                    "index points at vacant slot {:?}",
                    id
                )));
            };
            if entry.key != *key {
                return Err(InvariantError::new(format!(
                    "slot {:?} holds a different key than its index entry",
                    id
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("lfu invariant violated: {}", e);
        }
    }

    fn evict_min_freq(&mut self) -> Option<(K, V, u64)> {
        let (entry, freq) = self.buckets.pop_min()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value, freq))
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            // replacing a value counts as an access
            self.buckets.touch(id);
            return self
                .buckets
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if let Some((_, _, freq)) = self.evict_min_freq() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();

                tracing::trace!(
                    capacity = self.capacity,
                    frequency = freq,
                    "lfu evicted least frequent entry"
                );
            }
        }

        let id = self.buckets.insert(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.buckets.touch(id);
        self.buckets.get(id).map(|entry| &entry.value)
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        tracing::trace!(dropped = self.index.len(), "lfu cleared");
        self.index.clear();
        self.buckets.clear();
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        self.buckets.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let (key, value, _) = self.evict_min_freq()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_found();

        Some((key, value))
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_call();

        let (entry, _) = self.buckets.peek_min()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_found();

        Some((&entry.key, &entry.value))
    }

    fn frequency(&self, key: &K) -> u64 {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_call();

        let Some(&id) = self.index.get(key) else {
            return 0;
        };

        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_found();

        self.buckets.frequency(id).unwrap_or(0)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LfuCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .field("min_freq", &self.buckets.min_freq())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with [`CacheConfig::DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(CacheConfig::DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LFU cache: an [`LfuCache`] behind `Arc<parking_lot::RwLock>`.
///
/// `get` and `insert` change counts and take the write lock; `peek`,
/// `contains`, `len` and `frequency` share the read lock.
#[cfg(feature = "concurrency")]
pub struct ConcurrentLfuCache<K, V> {
    inner: Arc<RwLock<LfuCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLfuCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLfuCache")
            .field("len", &cache.index.len())
            .field("capacity", &cache.capacity)
            .field("min_freq", &cache.buckets.min_freq())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// ```
    /// use boundcache::policy::lfu::ConcurrentLfuCache;
    ///
    /// let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(8);
    /// cache.insert(1, 10);
    /// assert_eq!(cache.get(&1), Some(10));
    /// assert_eq!(cache.frequency(&1), 2);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LfuCache::new(capacity))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LfuCache::try_new(capacity).map(Self::from_cache)
    }

    pub fn from_cache(cache: LfuCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn frequency(&self, key: &K) -> u64 {
        self.inner.read().frequency(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn pop_lfu(&self) -> Option<(K, V)> {
        self.inner.write().pop_lfu()
    }

    pub fn peek_lfu(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .peek_lfu()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Keys in eviction order.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LfuCache<K, V>) -> R) -> R {
        let mut cache = self.inner.write();
        f(&mut cache)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLfuCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

//! # LRU (Least Recently Used) Cache
//!
//! Bounded cache that evicts the entry whose last access is the oldest.
//! `get` and `insert` are the accesses; everything else leaves the order
//! alone.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>                                        │
//!   │   ┌──────────┬──────────┐                                            │
//!   │   │ "page_a" │  id_3    │───┐                                        │
//!   │   │ "page_b" │  id_0    │───┼──┐                                     │
//!   │   │ "page_c" │  id_1    │───┼──┼──┐                                  │
//!   │   └──────────┴──────────┘   │  │  │                                  │
//!   │                             ▼  ▼  ▼                                  │
//!   │   list: IntrusiveList<Entry<K, V>>  (nodes live in a SlotArena)      │
//!   │                                                                      │
//!   │   head ─► [id_3: a] ◄──► [id_1: c] ◄──► [id_0: b] ◄── tail           │
//!   │           most recent                    least recent (evict first)  │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each operation does one hash lookup and a constant number of link
//! updates. Freed slots go back to the arena's free list and are reused by
//! later inserts.
//!
//! ## Operations
//!
//! | Method              | Complexity | Access? | Notes                          |
//! |---------------------|------------|---------|--------------------------------|
//! | `get(&k)`           | O(1)       | yes     | hit moves key to the head      |
//! | `insert(k, v)`      | O(1)       | yes     | evicts the tail if full        |
//! | `remove(&k)`        | O(1)       | -       |                                |
//! | `peek(&k)`          | O(1)       | no      |                                |
//! | `contains(&k)`      | O(1)       | no      |                                |
//! | `pop_lru()`         | O(1)       | -       |                                |
//! | `peek_lru()`        | O(1)       | no      |                                |
//! | `touch(&k)`         | O(1)       | yes     | promote without reading        |
//! | `recency_rank(&k)`  | O(n)       | no      | 0 = most recent                |
//! | `keys()`/`values()` | O(n)       | no      | least recent first             |
//! | `clear()`           | O(n)       | -       |                                |
//!
//! ## Example
//!
//! ```
//! use boundcache::policy::lru::LruCache;
//! use boundcache::traits::{CoreCache, LruCacheTrait, MutableCache, ReadOnlyCache};
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//!
//! // "a" becomes most recent, so "b" is evicted next
//! assert_eq!(cache.get(&"a"), Some(&1));
//! cache.insert("c", 3);
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.keys(), vec!["a", "c"]);
//! assert_eq!(cache.peek_lru(), Some((&"a", &1)));
//! assert_eq!(cache.remove(&"a"), Some(1));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` needs `&mut self` for every access and is not `Sync` in any
//! useful sense. Wrap it in a `Mutex`, or enable the `concurrency` feature
//! for [`ConcurrentLruCache`], an `Arc<parking_lot::RwLock<_>>` wrapper.

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::config::CacheConfig;
use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache, ReadOnlyCache};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Bounded LRU cache with O(1) `get`, `insert` and `remove`.
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get
    /// a [`ConfigError`] instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// ```
    /// use boundcache::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// assert!(LruCache::<u32, u32>::try_new(1).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::from_config(CacheConfig::new(capacity))
    }

    /// Creates a cache from a validated [`CacheConfig`].
    ///
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
            list: IntrusiveList::with_capacity(reserve),
            capacity: config.capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Reads a value without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.list.iter_rev().map(|entry| entry.key.clone()).collect()
    }

    /// Values from least to most recently used.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.list.iter_rev().map(|entry| entry.value.clone()).collect()
    }

    /// Borrowing iterator from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter_rev().map(|entry| (&entry.key, &entry.value))
    }

    /// Checks that the index and the recency list agree.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant as an [`InvariantError`].
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.validate().map_err(InvariantError::new)?;
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but list has {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {:?} holds a different key than its index entry",
                        id
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at vacant slot {:?}",
                        id
                    )));
                },
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("lru invariant violated: {}", e);
        }
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }
}

impl<K, V> ReadOnlyCache<K, V> for LruCache<K, V>
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

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();

                tracing::trace!(capacity = self.capacity, "lru evicted least recent entry");
            }
        }

        let id = self.list.push_front(Entry {
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

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        tracing::trace!(dropped = self.index.len(), "lru cleared");
        self.index.clear();
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        self.list.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.evict_lru();

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_lru_found();
        }

        popped
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.list.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        self.list.move_to_front(id)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        if !self.index.contains_key(key) {
            return None;
        }
        let rank = self.list.iter().position(|entry| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            entry.key == *key
        })?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_found();

        Some(rank)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LruCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with [`CacheConfig::DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(CacheConfig::DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache: an [`LruCache`] behind `Arc<parking_lot::RwLock>`.
///
/// `get`, `insert` and the other reordering calls take the write lock;
/// `peek`, `contains` and `len` share the read lock. Values are handed out by
/// clone. Cloning the wrapper shares the same cache.
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.index.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// ```
    /// use boundcache::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from_cache)
    }

    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Looks up a value and marks it most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    /// Reads a value without reordering; only takes the read lock.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
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

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    pub fn peek_lru(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .peek_lru()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        let mut cache = self.inner.write();
        f(&mut cache)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[u32]) -> LruCache<u32, u32> {
        let mut cache = LruCache::new(capacity);
        for &k in keys {
            cache.insert(k, k * 10);
        }
        cache
    }

    mod construction {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
            assert_eq!(err.field(), "capacity");
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than zero")]
        fn new_panics_on_zero_capacity() {
            let _ = LruCache::<u32, u32>::new(0);
        }

        #[test]
        fn huge_capacity_does_not_preallocate() {
            let cache = LruCache::<u64, u64>::try_new(usize::MAX).unwrap();
            assert_eq!(cache.capacity(), usize::MAX);
            assert!(cache.is_empty());
        }

        #[test]
        fn default_uses_default_capacity() {
            let cache = LruCache::<u8, u8>::default();
            assert_eq!(cache.capacity(), CacheConfig::DEFAULT_CAPACITY);
        }
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn insert_then_get() {
            let mut cache = LruCache::new(3);
            assert_eq!(cache.insert("a", 1), None);
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"zz"), None);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn insert_existing_replaces_and_returns_old() {
            let mut cache = LruCache::new(2);
            cache.insert("a", 1);
            assert_eq!(cache.insert("a", 2), Some(1));
            assert_eq!(cache.peek(&"a"), Some(&2));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn evicts_least_recent_when_full() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.insert(4, 40);
            assert!(!cache.contains(&1));
            assert_eq!(cache.keys(), vec![2, 3, 4]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn get_protects_from_eviction() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.get(&1);
            cache.insert(4, 40);
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn update_refreshes_recency() {
            let mut cache = filled(2, &[1, 2]);
            cache.insert(1, 11);
            cache.insert(3, 30);
            assert_eq!(cache.keys(), vec![1, 3]);
            assert_eq!(cache.values(), vec![11, 30]);
        }

        #[test]
        fn update_when_full_does_not_evict() {
            let mut cache = filled(2, &[1, 2]);
            assert_eq!(cache.insert(2, 99), Some(20));
            assert_eq!(cache.len(), 2);
            assert!(cache.contains(&1));
        }

        #[test]
        fn remove_present_and_absent() {
            let mut cache = filled(3, &[1, 2]);
            assert_eq!(cache.remove(&1), Some(10));
            assert_eq!(cache.remove(&1), None);
            assert_eq!(cache.len(), 1);
            cache.debug_validate_invariants();
        }

        #[test]
        fn clear_keeps_capacity() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 3);
            cache.insert(7, 70);
            assert_eq!(cache.keys(), vec![7]);
        }

        #[test]
        fn reinsert_after_remove_is_most_recent() {
            let mut cache = filled(3, &[1, 2, 3]);
            cache.remove(&1);
            cache.insert(1, 11);
            assert_eq!(cache.keys(), vec![2, 3, 1]);
        }
    }

    mod read_only {
        use super::*;

        #[test]
        fn peek_and_contains_do_not_reorder() {
            let cache_keys = [1, 2, 3];
            let mut cache = filled(3, &cache_keys);
            assert_eq!(cache.peek(&1), Some(&10));
            assert!(cache.contains(&1));
            cache.insert(4, 40);
            assert!(!cache.contains(&1));
        }

        #[test]
        fn miss_changes_nothing() {
            let mut cache = filled(3, &[1, 2, 3]);
            let before = cache.keys();
            assert_eq!(cache.get(&42), None);
            assert_eq!(cache.keys(), before);
            assert_eq!(cache.len(), 3);
        }

        #[test]
        fn is_full_tracks_len() {
            let mut cache = LruCache::new(2);
            assert!(!cache.is_full());
            cache.insert(1, 1);
            cache.insert(2, 2);
            assert!(cache.is_full());
            cache.remove(&1);
            assert!(!cache.is_full());
        }

        #[test]
        fn iter_matches_keys_and_values() {
            let mut cache = filled(4, &[5, 6, 7]);
            cache.get(&5);
            let pairs: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(pairs, vec![(6, 60), (7, 70), (5, 50)]);
        }
    }

    mod lru_operations {
        use super::*;

        #[test]
        fn pop_and_peek_lru() {
            let mut cache = filled(3, &[1, 2, 3]);
            assert_eq!(cache.peek_lru(), Some((&1, &10)));
            assert_eq!(cache.pop_lru(), Some((1, 10)));
            assert_eq!(cache.pop_lru(), Some((2, 20)));
            assert_eq!(cache.pop_lru(), Some((3, 30)));
            assert_eq!(cache.pop_lru(), None);
            assert_eq!(cache.peek_lru(), None);
        }

        #[test]
        fn touch_promotes() {
            let mut cache = filled(3, &[1, 2, 3]);
            assert!(cache.touch(&1));
            assert!(!cache.touch(&9));
            assert_eq!(cache.peek_lru(), Some((&2, &20)));
        }

        #[test]
        fn recency_rank_counts_from_most_recent() {
            let mut cache = filled(3, &[1, 2, 3]);
            assert_eq!(cache.recency_rank(&3), Some(0));
            assert_eq!(cache.recency_rank(&1), Some(2));
            cache.get(&1);
            assert_eq!(cache.recency_rank(&1), Some(0));
            assert_eq!(cache.recency_rank(&3), Some(1));
            assert_eq!(cache.recency_rank(&9), None);
        }

        #[test]
        fn extend_inserts_in_order() {
            let mut cache = LruCache::new(2);
            cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
            assert_eq!(cache.keys(), vec![2, 3]);
        }
    }

    mod invariants {
        use super::*;

        #[test]
        fn capacity_one_churn() {
            let mut cache = LruCache::new(1);
            for i in 0..50u32 {
                cache.insert(i, i);
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.keys(), vec![i]);
                cache.debug_validate_invariants();
            }
        }

        #[test]
        fn slots_are_reused_after_churn() {
            let mut cache = LruCache::new(4);
            for i in 0..1000u32 {
                cache.insert(i, i);
            }
            assert_eq!(cache.len(), 4);
            assert!(cache.check_invariants().is_ok());
        }

        #[test]
        fn debug_output_is_compact() {
            let cache = filled(3, &[1]);
            let dbg = format!("{:?}", cache);
            assert!(dbg.contains("len: 1"));
            assert!(dbg.contains("capacity: 3"));
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_hits_misses_and_evictions() {
            let mut cache = filled(2, &[1, 2]);
            cache.get(&1);
            cache.get(&9);
            cache.insert(3, 30);
            cache.peek_lru();
            cache.recency_rank(&3);

            let snap = cache.snapshot();
            assert_eq!(snap.core.get_hits, 1);
            assert_eq!(snap.core.get_misses, 1);
            assert_eq!(snap.core.insert_new, 3);
            assert_eq!(snap.core.evicted_entries, 1);
            assert_eq!(snap.peek_lru_found, 1);
            assert_eq!(snap.recency_rank_found, 1);
            assert_eq!(snap.recency_rank_scan_steps, 1);
            assert_eq!(snap.cache_len, 2);

            cache.reset_metrics();
            assert_eq!(cache.snapshot().core.get_calls, 0);
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrent {
        use super::*;

        #[test]
        fn wrapper_shares_state_between_clones() {
            let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(2);
            let other = cache.clone();
            other.insert(1, "one".to_string());
            assert_eq!(cache.get(&1), Some("one".to_string()));
            assert_eq!(cache.peek(&1), Some("one".to_string()));
            assert!(ConcurrentLruCache::<u32, u32>::try_new(0).is_err());
        }

        #[test]
        fn wrapper_evicts_like_inner_cache() {
            let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(2);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.touch(&1);
            cache.insert(3, 3);
            assert_eq!(cache.keys(), vec![1, 3]);
            assert_eq!(cache.peek_lru(), Some((1, 1)));
            cache.with_cache(|inner| inner.debug_validate_invariants());
        }

        #[test]
        fn debug_names_the_wrapper() {
            let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(4);
            cache.insert(1, 1);
            let dbg = format!("{:?}", cache);
            assert!(dbg.starts_with("ConcurrentLruCache"), "{}", dbg);
            assert!(dbg.contains("len: 1"));
            assert!(dbg.contains("capacity: 4"));
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Operation {
        Insert(u8, u16),
        Get(u8),
        Remove(u8),
        Touch(u8),
        PopLru,
    }

    fn operation_strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            4 => (0u8..32, any::<u16>()).prop_map(|(k, v)| Operation::Insert(k, v)),
            3 => (0u8..32).prop_map(Operation::Get),
            1 => (0u8..32).prop_map(Operation::Remove),
            1 => (0u8..32).prop_map(Operation::Touch),
            1 => Just(Operation::PopLru),
        ]
    }

    proptest! {
        /// Arbitrary operation sequences keep the index and list in sync.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_arbitrary_ops_maintain_invariants(
            capacity in 1usize..16,
            ops in prop::collection::vec(operation_strategy(), 0..200)
        ) {
            let mut cache = LruCache::new(capacity);
            for op in ops {
                match op {
                    Operation::Insert(k, v) => { cache.insert(k, v); }
                    Operation::Get(k) => { cache.get(&k); }
                    Operation::Remove(k) => { cache.remove(&k); }
                    Operation::Touch(k) => { cache.touch(&k); }
                    Operation::PopLru => { cache.pop_lru(); }
                }
                prop_assert!(cache.check_invariants().is_ok());
                prop_assert!(cache.len() <= cache.capacity());
            }
        }

        /// The most recently accessed key is always last in `keys()`.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_last_access_is_most_recent(
            capacity in 1usize..16,
            keys in prop::collection::vec(0u8..32, 1..100)
        ) {
            let mut cache = LruCache::new(capacity);
            for k in keys {
                if cache.get(&k).is_none() {
                    cache.insert(k, ());
                }
                prop_assert_eq!(cache.keys().last().copied(), Some(k));
                prop_assert_eq!(cache.recency_rank(&k), Some(0));
            }
        }
    }
}

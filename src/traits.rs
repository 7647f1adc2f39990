//! # Cache Trait Hierarchy
//!
//! Shared interface for the bounded caches in this crate. The hierarchy keeps
//! the universal operations separate from the policy-specific ones, so generic
//! code can be written against exactly the capabilities it needs.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────────────────┐
//!                  │         ReadOnlyCache<K, V>          │
//!                  │                                      │
//!                  │  contains(&, &K) → bool              │
//!                  │  len(&) → usize                      │
//!                  │  is_empty(&) / is_full(&) → bool     │
//!                  │  capacity(&) → usize                 │
//!                  └──────────────────┬───────────────────┘
//!                                     │
//!                                     ▼
//!                  ┌──────────────────────────────────────┐
//!                  │           CoreCache<K, V>            │
//!                  │                                      │
//!                  │  insert(&mut, K, V) → Option<V>      │
//!                  │  get(&mut, &K) → Option<&V>          │
//!                  │  clear(&mut)                         │
//!                  └──────────────────┬───────────────────┘
//!                                     │
//!                                     ▼
//!                  ┌──────────────────────────────────────┐
//!                  │          MutableCache<K, V>          │
//!                  │                                      │
//!                  │  remove(&mut, &K) → Option<V>        │
//!                  │  remove_batch(&mut, &[K])            │
//!                  └──────────────────┬───────────────────┘
//!                                     │
//!                ┌────────────────────┴────────────────────┐
//!                ▼                                         ▼
//!   ┌────────────────────────────┐           ┌────────────────────────────┐
//!   │   LruCacheTrait<K, V>      │           │   LfuCacheTrait<K, V>      │
//!   │                            │           │                            │
//!   │  pop_lru() → (K, V)        │           │  pop_lfu() → (K, V)        │
//!   │  peek_lru() → (&K, &V)     │           │  peek_lfu() → (&K, &V)     │
//!   │  touch(&K) → bool          │           │  frequency(&K) → u64       │
//!   │  recency_rank(&K) → usize  │           │                            │
//!   └────────────────────────────┘           └────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait             | Extends         | Purpose                              |
//! |-------------------|-----------------|--------------------------------------|
//! | `ReadOnlyCache`   | -               | Inspection without touching order    |
//! | `CoreCache`       | `ReadOnlyCache` | Insert, lookup, clear                |
//! | `MutableCache`    | `CoreCache`     | Arbitrary key removal                |
//! | `LruCacheTrait`   | `MutableCache`  | Recency-ordered eviction             |
//! | `LfuCacheTrait`   | `MutableCache`  | Frequency-ordered eviction           |
//! | `ConcurrentCache` | `Send + Sync`   | Marker for thread-safe wrappers      |
//!
//! ## Access semantics
//!
//! Only [`CoreCache::get`] and [`CoreCache::insert`] count as accesses.
//! Everything on [`ReadOnlyCache`] leaves recency and frequency untouched, so
//! it is safe to call from monitoring code.
//!
//! ## Example
//!
//! ```
//! use boundcache::policy::lru::LruCache;
//! use boundcache::traits::{CoreCache, MutableCache, ReadOnlyCache};
//!
//! fn refresh<C: MutableCache<u64, String>>(cache: &mut C, stale: &[u64]) -> usize {
//!     cache.remove_batch(stale).into_iter().flatten().count()
//! }
//!
//! let mut cache = LruCache::new(4);
//! cache.insert(1, "one".to_string());
//! cache.insert(2, "two".to_string());
//!
//! assert_eq!(refresh(&mut cache, &[1, 9]), 1);
//! assert_eq!(cache.len(), 1);
//! assert!(!cache.is_full());
//! ```

/// Read-only inspection shared by every cache.
///
/// None of these methods count as an access.
pub trait ReadOnlyCache<K, V> {
    /// Checks if a key exists without updating access state.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::lfu::LfuCache;
    /// use boundcache::traits::{CoreCache, LfuCacheTrait, ReadOnlyCache};
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert!(cache.contains(&1));
    /// assert_eq!(cache.frequency(&1), 1);
    /// assert!(!cache.contains(&99));
    /// ```
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed maximum number of entries.
    fn capacity(&self) -> usize;

    /// Returns `true` if the next insert of a new key will evict.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::lru::LruCache;
    /// use boundcache::traits::{CoreCache, ReadOnlyCache};
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert("a", 1);
    /// assert!(!cache.is_full());
    /// cache.insert("b", 2);
    /// assert!(cache.is_full());
    /// ```
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

/// Operations every bounded cache supports.
///
/// # Example
///
/// ```
/// use boundcache::policy::lru::LruCache;
/// use boundcache::traits::{CoreCache, ReadOnlyCache};
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// was present.
    ///
    /// Inserting a new key into a full cache evicts one entry first, chosen
    /// by the cache's policy. Replacing the value of an existing key never
    /// evicts.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::lru::LruCache;
    /// use boundcache::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up a value and records the access.
    ///
    /// A miss returns `None` and leaves the cache unchanged.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes all entries. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that support removal of an arbitrary key.
///
/// # Example
///
/// ```
/// use boundcache::policy::lfu::LfuCache;
/// use boundcache::traits::{CoreCache, MutableCache, ReadOnlyCache};
///
/// let mut cache = LfuCache::new(10);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three");
///
/// assert_eq!(cache.remove(&2), Some("two"));
/// assert_eq!(cache.remove(&2), None);
///
/// let removed = cache.remove_batch(&[1, 99, 3]);
/// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
/// assert!(cache.is_empty());
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; results line up with the input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-ordered eviction.
///
/// # Example
///
/// ```
/// use boundcache::policy::lru::LruCache;
/// use boundcache::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving value
/// assert!(cache.touch(&2));
/// assert_eq!(cache.pop_lru(), Some((3, "third")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the least recently used entry without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without reading it.
    ///
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Recency rank of a key: 0 is the most recent. O(n).
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::lru::LruCache;
    /// use boundcache::traits::{CoreCache, LruCacheTrait};
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    /// cache.insert(3, "third");
    ///
    /// assert_eq!(cache.recency_rank(&3), Some(0));
    /// assert_eq!(cache.recency_rank(&1), Some(2));
    /// assert_eq!(cache.recency_rank(&99), None);
    /// ```
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Frequency-ordered eviction with recency tie-breaking.
///
/// # Example
///
/// ```
/// use boundcache::policy::lfu::LfuCache;
/// use boundcache::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache = LfuCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// cache.get(&1);
/// cache.get(&1);
///
/// // 1 insert + 2 gets
/// assert_eq!(cache.frequency(&1), 3);
/// assert_eq!(cache.frequency(&2), 1);
///
/// // 2 and 3 tie at 1; 2 was touched longer ago
/// assert_eq!(cache.pop_lfu(), Some((2, "second")));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the entry with the lowest access count, least
    /// recently touched among ties.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the entry [`pop_lfu`](Self::pop_lfu) would remove.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count of a key, or 0 if it is absent.
    ///
    /// Reading the count is not an access.
    fn frequency(&self, key: &K) -> u64;
}

/// Marker for caches that can be shared across threads.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use boundcache::policy::lru::ConcurrentLruCache;
/// use boundcache::traits::ConcurrentCache;
///
/// fn share<C: ConcurrentCache + Clone + 'static>(cache: &C) -> C {
///     cache.clone()
/// }
///
/// let cache: ConcurrentLruCache<u64, String> = ConcurrentLruCache::new(16);
/// let other = share(&cache);
/// std::thread::spawn(move || other.insert(1, "one".to_string()))
///     .join()
///     .unwrap();
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// # }
/// ```
pub trait ConcurrentCache: Send + Sync {}

//! Frequency buckets for O(1) LFU ordering.
//!
//! Every tracked entry sits in the bucket for its access count. A bucket is a
//! doubly linked list of entries ordered by recency (head = most recently
//! touched), and the non-empty buckets are themselves linked in ascending
//! frequency order. `min_freq` names the lowest non-empty bucket, so the
//! eviction candidate is always the tail of that bucket.
//!
//! ```text
//!   min_freq = 1
//!       │
//!       ▼
//!   freq=1: head ─► [id_5] ◄──► [id_2] ◄── tail   (evicted first)
//!       │ next
//!       ▼
//!   freq=3: head ─► [id_0] ◄── tail
//!       │ next
//!       ▼
//!   freq=4: head ─► [id_3] ◄──► [id_1] ◄── tail
//! ```
//!
//! Entries are addressed by the [`SlotId`] returned from
//! [`FrequencyBuckets::insert`]; the structure does not hash keys itself.
//! The caller owns the key → id mapping and stores whatever payload it likes
//! (the LFU cache stores the key and the value).
//!
//! | Operation   | Cost |
//! |-------------|------|
//! | `insert`    | O(1) |
//! | `touch`     | O(1) |
//! | `remove`    | O(1) |
//! | `pop_min`   | O(1) |
//! | `peek_min`  | O(1) |
//! | `iter`      | O(n) |

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Entry<T> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    payload: T,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Handle-addressed LFU tracker with recency tie-breaking inside a frequency.
///
/// # Example
///
/// ```
/// use boundcache::ds::FrequencyBuckets;
///
/// let mut buckets = FrequencyBuckets::new();
/// let a = buckets.insert("a");
/// let _b = buckets.insert("b");
/// buckets.touch(a);
///
/// assert_eq!(buckets.frequency(a), Some(2));
/// assert_eq!(buckets.min_freq(), Some(1));
/// assert_eq!(buckets.pop_min(), Some(("b", 1)));
/// assert_eq!(buckets.pop_min(), Some(("a", 2)));
/// assert_eq!(buckets.pop_min(), None);
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<T> {
    entries: SlotArena<Entry<T>>,
    buckets: FxHashMap<u64, Bucket>,
    // 0 when empty
    min_freq: u64,
}

impl<T> FrequencyBuckets<T> {
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates an empty tracker with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest frequency currently tracked, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        self.entries.get(id).map(|entry| entry.freq)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.entries.get(id).map(|entry| &entry.payload)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.entries.get_mut(id).map(|entry| &mut entry.payload)
    }

    /// Starts tracking `payload` at frequency 1 as the most recent entry of
    /// that bucket.
    pub fn insert(&mut self, payload: T) -> SlotId {
        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            payload,
        });

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq().filter(|&freq| freq > 1);
            self.insert_bucket(1, None, next);
        }
        self.list_push_front(1, id);
        self.min_freq = 1;
        id
    }

    /// Bumps the entry's frequency by one and makes it the most recent entry
    /// of its new bucket. Returns the new frequency, or `None` for a stale id.
    ///
    /// At `u64::MAX` the count saturates and only the recency is refreshed.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let current = self.entries.get(id)?.freq;
        if current == u64::MAX {
            self.list_remove(current, id)?;
            self.list_push_front(current, id);
            return Some(current);
        }
        let next_freq = current + 1;

        let (prev_existing, next_existing) = {
            let bucket = self.buckets.get(&current)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(current, id)?;
        let emptied = self.bucket_is_empty(current);
        if emptied {
            self.remove_bucket(current, prev_existing, next_existing);
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if emptied { prev_existing } else { Some(current) };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);

        if emptied && self.min_freq == current {
            self.min_freq = next_freq;
        }
        Some(next_freq)
    }

    /// Stops tracking the entry and returns its payload.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let freq = self.entries.get(id)?.freq;
        self.detach(freq, id)?;
        self.entries.remove(id).map(|entry| entry.payload)
    }

    /// The next eviction candidate: least recent entry of the lowest bucket.
    pub fn peek_min_id(&self) -> Option<SlotId> {
        self.buckets.get(&self.min_freq)?.tail
    }

    pub fn peek_min(&self) -> Option<(&T, u64)> {
        let entry = self.entries.get(self.peek_min_id()?)?;
        Some((&entry.payload, entry.freq))
    }

    /// Removes and returns the eviction candidate with its frequency.
    pub fn pop_min(&mut self) -> Option<(T, u64)> {
        let id = self.peek_min_id()?;
        let freq = self.min_freq;
        self.detach(freq, id)?;
        self.entries.remove(id).map(|entry| (entry.payload, freq))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Iterates entries in eviction order: ascending frequency, and least
    /// recent first inside each frequency.
    pub fn iter(&self) -> Iter<'_, T> {
        let current = self.peek_min_id();
        Iter {
            buckets: self,
            freq: self.min_freq,
            current,
        }
    }

    /// Checks bucket links, entry links and `min_freq`.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            if !self.buckets.is_empty() || self.min_freq != 0 {
                return Err(format!(
                    "empty tracker still has {} buckets, min_freq {}",
                    self.buckets.len(),
                    self.min_freq
                ));
            }
            return Ok(());
        }

        if !self.buckets.contains_key(&self.min_freq) {
            return Err(format!("min_freq {} has no bucket", self.min_freq));
        }

        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            if bucket.head.is_none() || bucket.tail.is_none() {
                return Err(format!("bucket {} is empty", freq));
            }
            match bucket.prev {
                Some(prev) => {
                    let back_link = self.buckets.get(&prev).and_then(|b| b.next);
                    if prev >= freq || back_link != Some(freq) {
                        return Err(format!("bucket {} has bad prev link {}", freq, prev));
                    }
                },
                None if freq != self.min_freq => {
                    return Err(format!(
                        "bucket {} has no prev but min_freq is {}",
                        freq, self.min_freq
                    ));
                },
                None => {},
            }
            if let Some(next) = bucket.next {
                let back_link = self.buckets.get(&next).and_then(|b| b.prev);
                if next <= freq || back_link != Some(freq) {
                    return Err(format!("bucket {} has bad next link {}", freq, next));
                }
            }

            let mut last = None;
            let mut current = bucket.head;
            while let Some(id) = current {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| format!("bucket {} links vacant slot {:?}", freq, id))?;
                if entry.freq != freq {
                    return Err(format!(
                        "entry {:?} has freq {} inside bucket {}",
                        id, entry.freq, freq
                    ));
                }
                if entry.prev != last {
                    return Err(format!("entry {:?} has a broken prev link", id));
                }
                total += 1;
                if total > self.len() {
                    return Err("bucket lists contain a cycle".to_string());
                }
                last = Some(id);
                current = entry.next;
            }
            if bucket.tail != last {
                return Err(format!("bucket {} tail does not match its last entry", freq));
            }
        }

        if total != self.len() {
            return Err(format!("buckets link {} entries, arena holds {}", total, self.len()));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(msg) = self.validate() {
            panic!("frequency bucket invariant violated: {}", msg);
        }
    }

    /// Unlinks `id` from bucket `freq`, dropping the bucket if it empties.
    fn detach(&mut self, freq: u64, id: SlotId) -> Option<()> {
        self.list_remove(freq, id)?;
        if self.bucket_is_empty(freq) {
            let (prev, next) = {
                let bucket = self.buckets.get(&freq)?;
                (bucket.prev, bucket.next)
            };
            self.remove_bucket(freq, prev, next);
            if self.min_freq == freq {
                self.min_freq = next.unwrap_or(0);
            }
        }
        Some(())
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .is_none_or(|bucket| bucket.head.is_none())
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );
        if let Some(bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            bucket.next = Some(freq);
        }
        if let Some(bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            bucket.next = next;
        }
        if let Some(bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return;
        };
        let old_head = bucket.head.replace(id);
        if old_head.is_none() {
            bucket.tail = Some(id);
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(entry) = old_head.and_then(|h| self.entries.get_mut(h)) {
            entry.prev = Some(id);
        }
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get_mut(id)?;
            (entry.prev.take(), entry.next.take())
        };
        let bucket = self.buckets.get_mut(&freq)?;
        match prev.and_then(|p| self.entries.get_mut(p)) {
            Some(entry) => entry.next = next,
            None => bucket.head = next,
        }
        match next.and_then(|n| self.entries.get_mut(n)) {
            Some(entry) => entry.prev = prev,
            None => bucket.tail = prev,
        }
        Some(())
    }
}

impl<T> Default for FrequencyBuckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(payload, frequency)` in eviction order.
pub struct Iter<'a, T> {
    buckets: &'a FrequencyBuckets<T>,
    freq: u64,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.buckets.entries.get(id)?;
        self.current = match entry.prev {
            Some(prev) => Some(prev),
            None => {
                let next_freq = self.buckets.buckets.get(&self.freq)?.next;
                match next_freq {
                    Some(freq) => {
                        self.freq = freq;
                        self.buckets.buckets.get(&freq).and_then(|b| b.tail)
                    },
                    None => None,
                }
            },
        };
        Some((&entry.payload, entry.freq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<T: Copy>(buckets: &FrequencyBuckets<T>) -> Vec<(T, u64)> {
        buckets.iter().map(|(p, f)| (*p, f)).collect()
    }

    #[test]
    fn insert_starts_at_one() {
        let mut buckets = FrequencyBuckets::new();
        let a = buckets.insert('a');
        assert_eq!(buckets.frequency(a), Some(1));
        assert_eq!(buckets.min_freq(), Some(1));
        assert_eq!(buckets.len(), 1);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn touch_moves_between_buckets() {
        let mut buckets = FrequencyBuckets::with_capacity(8);
        let a = buckets.insert('a');
        let b = buckets.insert('b');

        assert_eq!(buckets.touch(a), Some(2));
        assert_eq!(buckets.touch(a), Some(3));
        assert_eq!(buckets.touch(b), Some(2));
        assert_eq!(buckets.min_freq(), Some(2));
        assert_eq!(order(&buckets), vec![('b', 2), ('a', 3)]);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn ties_evict_least_recent() {
        let mut buckets = FrequencyBuckets::new();
        let a = buckets.insert('a');
        let b = buckets.insert('b');
        let c = buckets.insert('c');
        // all reach freq 2; `a` touched last
        buckets.touch(b);
        buckets.touch(c);
        buckets.touch(a);

        assert_eq!(buckets.peek_min(), Some((&'b', 2)));
        assert_eq!(buckets.pop_min(), Some(('b', 2)));
        assert_eq!(buckets.pop_min(), Some(('c', 2)));
        assert_eq!(buckets.pop_min(), Some(('a', 2)));
        assert!(buckets.is_empty());
        assert_eq!(buckets.min_freq(), None);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn new_entry_goes_below_existing_buckets() {
        let mut buckets = FrequencyBuckets::new();
        let a = buckets.insert('a');
        buckets.touch(a);
        buckets.touch(a);
        assert_eq!(buckets.min_freq(), Some(3));

        buckets.insert('b');
        assert_eq!(buckets.min_freq(), Some(1));
        assert_eq!(order(&buckets), vec![('b', 1), ('a', 3)]);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn remove_advances_min_freq() {
        let mut buckets = FrequencyBuckets::new();
        let a = buckets.insert('a');
        let b = buckets.insert('b');
        buckets.touch(b);
        buckets.touch(b);

        assert_eq!(buckets.remove(a), Some('a'));
        assert_eq!(buckets.min_freq(), Some(3));
        assert_eq!(buckets.remove(a), None);
        assert_eq!(buckets.touch(a), None);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn touch_of_sole_min_entry_links_to_existing_next_bucket() {
        let mut buckets = FrequencyBuckets::new();
        let a = buckets.insert('a');
        let b = buckets.insert('b');
        buckets.touch(b);
        // `a` leaves bucket 1, which empties, and joins bucket 2
        buckets.touch(b);
        buckets.touch(a);
        buckets.debug_validate_invariants();
        assert_eq!(order(&buckets), vec![('a', 2), ('b', 3)]);
    }

    #[test]
    fn saturated_frequency_only_refreshes_recency() {
        let mut buckets = FrequencyBuckets::new();
        let a = buckets.insert('a');
        let b = buckets.insert('b');
        for id in [a, b] {
            let freq = buckets.entries.get(id).unwrap().freq;
            buckets.list_remove(freq, id);
            buckets.detach_empty_for_test(freq);
            buckets.entries.get_mut(id).unwrap().freq = u64::MAX;
            if !buckets.buckets.contains_key(&u64::MAX) {
                buckets.insert_bucket(u64::MAX, None, None);
            }
            buckets.list_push_front(u64::MAX, id);
        }
        buckets.min_freq = u64::MAX;
        buckets.debug_validate_invariants();

        assert_eq!(buckets.peek_min(), Some((&'a', u64::MAX)));
        assert_eq!(buckets.touch(a), Some(u64::MAX));
        assert_eq!(buckets.peek_min(), Some((&'b', u64::MAX)));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn get_mut_and_clear() {
        let mut buckets = FrequencyBuckets::new();
        let id = buckets.insert(String::from("v"));
        buckets.get_mut(id).unwrap().push('2');
        assert_eq!(buckets.get(id).map(String::as_str), Some("v2"));

        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(buckets.iter().count(), 0);
        assert!(buckets.validate().is_ok());
    }

    impl<T> FrequencyBuckets<T> {
        fn detach_empty_for_test(&mut self, freq: u64) {
            if self.bucket_is_empty(freq) {
                let (prev, next) = {
                    let bucket = &self.buckets[&freq];
                    (bucket.prev, bucket.next)
                };
                self.remove_bucket(freq, prev, next);
            }
        }
    }
}

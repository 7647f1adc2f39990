// ==============================================
// CONCURRENCY TESTS (integration)
// ==============================================
//
// The engines are single-threaded; callers share them behind one lock. These
// tests exercise that pattern with `std::sync::Mutex` and, when the
// `concurrency` feature is on, the bundled `parking_lot` wrappers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 2_000;

mod mutex_wrapped {
    use boundcache::policy::lfu::LfuCache;
    use boundcache::policy::lru::LruCache;
    use boundcache::traits::{CoreCache, LfuCacheTrait, MutableCache, ReadOnlyCache};

    use super::*;

    #[test]
    fn lru_mixed_workload_keeps_capacity() {
        let cache = Arc::new(Mutex::new(LruCache::new(64)));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|thread_id| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(thread_id as u64);
                    barrier.wait();
                    for _ in 0..OPS_PER_THREAD {
                        let key: u32 = rng.gen_range(0..256);
                        let mut guard = cache.lock().unwrap();
                        match rng.gen_range(0..10) {
                            0..=4 => {
                                guard.insert(key, thread_id);
                            },
                            5..=8 => {
                                let _ = guard.get(&key);
                            },
                            _ => {
                                let _ = guard.remove(&key);
                            },
                        }
                        assert!(guard.len() <= guard.capacity());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let cache = cache.lock().unwrap();
        assert!(cache.len() <= 64);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lfu_counts_every_locked_access() {
        let cache = Arc::new(Mutex::new(LfuCache::new(16)));
        cache.lock().unwrap().insert("hot", 0u32);

        let hits = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let hits = Arc::clone(&hits);
                thread::spawn(move || {
                    for _ in 0..100 {
                        if cache.lock().unwrap().get(&"hot").is_some() {
                            hits.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let hits = hits.load(Ordering::Relaxed) as u64;
        assert_eq!(hits, (THREADS * 100) as u64);
        assert_eq!(cache.lock().unwrap().frequency(&"hot"), hits + 1);
    }

    #[test]
    fn lfu_disjoint_writers_keep_invariants() {
        let cache = Arc::new(Mutex::new(LfuCache::new(32)));

        let handles: Vec<_> = (0..THREADS)
            .map(|thread_id| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(0xC0FFEE + thread_id as u64);
                    for i in 0..OPS_PER_THREAD {
                        let key = (thread_id * 1_000 + rng.gen_range(0..64)) as u64;
                        let mut guard = cache.lock().unwrap();
                        if i % 3 == 0 {
                            guard.insert(key, i);
                        } else {
                            let _ = guard.get(&key);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let cache = cache.lock().unwrap();
        assert!(cache.len() <= 32);
        cache.check_invariants().unwrap();
    }
}

#[cfg(feature = "concurrency")]
mod lock_wrappers {
    use boundcache::policy::lfu::ConcurrentLfuCache;
    use boundcache::policy::lru::ConcurrentLruCache;

    use super::*;

    #[test]
    fn concurrent_lru_shared_across_threads() {
        let cache: ConcurrentLruCache<u32, usize> = ConcurrentLruCache::new(128);
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|thread_id| {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(thread_id as u64);
                    barrier.wait();
                    for _ in 0..OPS_PER_THREAD {
                        let key = rng.gen_range(0..512);
                        match rng.gen_range(0..4) {
                            0 | 1 => {
                                cache.insert(key, thread_id);
                            },
                            2 => {
                                let _ = cache.get(&key);
                            },
                            _ => {
                                let _ = cache.touch(&key);
                            },
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= cache.capacity());
        cache.with_cache(|inner| inner.check_invariants()).unwrap();
    }

    #[test]
    fn concurrent_lfu_frequency_matches_hits() {
        let cache: ConcurrentLfuCache<&'static str, u8> = ConcurrentLfuCache::new(4);
        cache.insert("k", 1);

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(cache.get(&"k"), Some(1));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.frequency(&"k"), (THREADS * 50) as u64 + 1);
        assert_eq!(cache.pop_lfu(), Some(("k", 1)));
        assert!(cache.is_empty());
    }

    #[test]
    fn wrappers_reject_zero_capacity() {
        assert!(ConcurrentLruCache::<u8, u8>::try_new(0).is_err());
        assert!(ConcurrentLfuCache::<u8, u8>::try_new(0).is_err());
    }
}

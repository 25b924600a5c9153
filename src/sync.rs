//! Thread-safe hierarchy wrapper (`concurrency` feature).
//!
//! [`SharedHierarchy`] puts a [`CacheHierarchy`] behind an
//! `Arc<parking_lot::Mutex<_>>`. One lock guards the whole hierarchy, and
//! every method holds it for its entire operation, so a traversal plus its
//! promotions is a single critical section and no reader can observe a
//! half-promoted key. This is mutual exclusion, not a concurrent cache:
//! per-level sharding or lock-free reads are out of scope.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ConfigError;
use crate::hierarchy::{CacheHierarchy, HierarchyStats, LevelDetails};

/// Cloneable handle to a mutex-guarded [`CacheHierarchy`].
#[derive(Clone)]
pub struct SharedHierarchy<K, V> {
    inner: Arc<Mutex<CacheHierarchy<K, V>>>,
}

impl<K, V> SharedHierarchy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(hierarchy: CacheHierarchy<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(hierarchy)),
        }
    }

    /// Traversal plus promotion under one lock acquisition.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Write-through across all levels under one lock acquisition.
    pub fn put(&self, key: K, value: V) -> Result<(), ConfigError> {
        self.inner.lock().put(key, value)
    }

    pub fn delete(&self, key: &K) -> bool {
        self.inner.lock().delete(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn reset_stats(&self) {
        self.inner.lock().reset_stats()
    }

    pub fn num_levels(&self) -> usize {
        self.inner.lock().num_levels()
    }

    pub fn total_size(&self) -> usize {
        self.inner.lock().total_size()
    }

    /// Consistent snapshot: counters cannot move mid-read.
    pub fn get_all_stats(&self) -> HierarchyStats {
        self.inner.lock().get_all_stats()
    }

    pub fn get_level_details(&self) -> Vec<LevelDetails> {
        self.inner.lock().get_level_details()
    }

    /// Runs `f` with exclusive access, for multi-step sequences that must
    /// not interleave (e.g. configuring levels after sharing the handle).
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut CacheHierarchy<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LruCache;
    use std::thread;

    fn shared() -> SharedHierarchy<u64, u64> {
        let mut tiers = CacheHierarchy::new("shared");
        tiers
            .add_level(Box::new(LruCache::new(64).unwrap()), "L1", 1.0)
            .unwrap();
        tiers
            .add_level(Box::new(LruCache::new(256).unwrap()), "L2", 10.0)
            .unwrap();
        SharedHierarchy::new(tiers)
    }

    #[test]
    fn basic_operations_round_trip() {
        let tiers = shared();
        tiers.put(1, 10).unwrap();
        assert_eq!(tiers.get(&1), Some(10));
        assert!(tiers.contains(&1));
        assert!(tiers.delete(&1));
        assert_eq!(tiers.get(&1), None);
    }

    #[test]
    fn accesses_from_many_threads_all_land() {
        let tiers = shared();
        let writers: Vec<_> = (0..4)
            .map(|worker: u64| {
                let tiers = tiers.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = worker * 1_000 + i;
                        tiers.put(key, key).unwrap();
                        tiers.get(&key);
                    }
                })
            })
            .collect();
        for handle in writers {
            handle.join().unwrap();
        }

        // Counters stay coherent under contention: every read is counted
        // exactly once as a hit or a miss.
        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_accesses, 400);
        assert_eq!(stats.global.total_hits + stats.global.total_misses, 400);
    }

    #[test]
    fn with_lock_spans_multiple_steps() {
        let tiers = shared();
        tiers.put(1, 10).unwrap();
        let (size_before, size_after) = tiers.with_lock(|hierarchy| {
            let before = hierarchy.total_size();
            hierarchy.clear();
            (before, hierarchy.total_size())
        });
        assert_eq!(size_before, 2);
        assert_eq!(size_after, 0);
    }
}

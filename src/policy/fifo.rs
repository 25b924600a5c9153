//! # First In, First Out (FIFO) policy
//!
//! Evicts in strict insertion order. Accessing or updating a key has **zero
//! effect** on its position — that is FIFO's defining property. The ordering
//! structure is a queue of keys, oldest at the front:
//!
//! ```text
//!   queue: [a] ─ [b] ─ [c] ─ [d]
//!           ▲                 ▲
//!      next eviction       newest
//! ```
//!
//! | Operation              | Time | Notes                                 |
//! |------------------------|------|---------------------------------------|
//! | insert                 | O(1) | append at the back                    |
//! | access / update        | O(1) | queue untouched                       |
//! | evict                  | O(1) | pop the front                         |
//! | delete                 | O(n) | removes the key wherever it sits      |
//! | `peek_next_eviction`   | O(1) | front without mutation                |
//!
//! A key appears in the queue exactly once while present, no matter how many
//! times it is re-read or overwritten, so eviction order among keys never
//! deleted equals their original insertion order.
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::prelude::*;
//!
//! let mut cache: FifoCache<&str, u32> = FifoCache::new(3).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! // Access does not protect "a".
//! cache.get(&"a");
//! assert_eq!(cache.peek_next_eviction(), Some(&"a"));
//!
//! cache.put("d", 4); // evicts "a"
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.insertion_order(), vec!["b", "c", "d"]);
//! ```

use std::collections::VecDeque;
use std::hash::Hash;

use crate::error::{ConfigError, InvariantError};
use crate::policy::engine::{EvictionStrategy, PolicyCache};
use crate::traits::{CachePolicy, PolicyKind};

/// Insertion-order bookkeeping for [`FifoCache`].
#[derive(Debug)]
pub struct FifoStrategy<K> {
    queue: VecDeque<K>,
}

impl<K> Default for FifoStrategy<K> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<K> EvictionStrategy<K> for FifoStrategy<K>
where
    K: Eq + Clone,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn on_insert(&mut self, key: &K) {
        self.queue.push_back(key.clone());
    }

    // Accesses and updates never reorder a FIFO queue.
    fn on_access(&mut self, _key: &K) {}

    fn on_update(&mut self, _key: &K) {}

    fn on_delete(&mut self, key: &K) {
        if let Some(pos) = self.queue.iter().position(|k| k == key) {
            self.queue.remove(pos);
        }
    }

    fn on_clear(&mut self) {
        self.queue.clear();
    }

    fn evict(&mut self) -> Option<K> {
        self.queue.pop_front()
    }

    fn ordered_keys(&self) -> Vec<K> {
        self.queue.iter().cloned().collect()
    }
}

/// FIFO cache: see the module docs for the eviction contract.
pub type FifoCache<K, V> = PolicyCache<K, V, FifoStrategy<K>>;

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a FIFO cache named `"FIFO"`.
    ///
    /// Fails when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_name(capacity, "FIFO")
    }

    /// Creates a FIFO cache with an explicit instance name.
    pub fn with_name(capacity: usize, name: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_strategy(capacity, name, FifoStrategy::default())
    }

    /// Key that the next eviction would remove, without mutating anything.
    pub fn peek_next_eviction(&self) -> Option<&K> {
        self.strategy().queue.front()
    }

    /// Keys in insertion order, oldest first.
    pub fn insertion_order(&self) -> Vec<K> {
        self.strategy().ordered_keys()
    }

    /// Verifies the store/queue correspondence.
    ///
    /// Checks that every stored key appears in the queue exactly once and
    /// that the queue holds nothing else.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let queue = &self.strategy().queue;
        if queue.len() != self.len() {
            return Err(InvariantError::new(format!(
                "queue length {} != entry count {}",
                queue.len(),
                self.len()
            )));
        }
        for key in queue {
            if !self.entry_map().contains_key(key) {
                return Err(InvariantError::new("queued key missing from store"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_in_insertion_order() {
        let mut cache: FifoCache<char, u32> = FifoCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);

        cache.put('d', 4);
        assert!(!cache.contains(&'a'));
        cache.put('e', 5);
        assert!(!cache.contains(&'b'));
        assert_eq!(cache.insertion_order(), vec!['c', 'd', 'e']);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn access_never_changes_position() {
        let mut cache: FifoCache<char, u32> = FifoCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);

        cache.get(&'a');
        cache.get(&'a');
        assert_eq!(cache.peek_next_eviction(), Some(&'a'));

        cache.put('d', 4);
        assert!(!cache.contains(&'a'));
    }

    #[test]
    fn update_never_changes_position() {
        let mut cache: FifoCache<char, u32> = FifoCache::new(2).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('a', 100); // update, not reinsertion
        assert_eq!(cache.insertion_order(), vec!['a', 'b']);
        assert_eq!(cache.peek_next_eviction(), Some(&'a'));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn delete_removes_from_queue_middle() {
        let mut cache: FifoCache<char, u32> = FifoCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);

        assert!(cache.delete(&'b'));
        assert_eq!(cache.insertion_order(), vec!['a', 'c']);
        cache.check_invariants().unwrap();

        // The freed slot admits a new key without eviction.
        cache.put('d', 4);
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.insertion_order(), vec!['a', 'c', 'd']);
    }

    #[test]
    fn peek_next_eviction_does_not_mutate() {
        let mut cache: FifoCache<char, u32> = FifoCache::new(2).unwrap();
        cache.put('a', 1);
        assert_eq!(cache.peek_next_eviction(), Some(&'a'));
        assert_eq!(cache.peek_next_eviction(), Some(&'a'));
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_follow_insertion_order() {
        let mut cache: FifoCache<u32, u32> = FifoCache::new(4).unwrap();
        for k in [3, 1, 4, 2] {
            cache.put(k, k * 10);
        }
        assert_eq!(cache.keys(), vec![3, 1, 4, 2]);
        assert_eq!(
            cache.items(),
            vec![(3, 30), (1, 10), (4, 40), (2, 20)]
        );
    }

    #[test]
    fn clear_resets_queue() {
        let mut cache: FifoCache<u32, u32> = FifoCache::new(2).unwrap();
        cache.put(1, 1);
        cache.clear();
        assert_eq!(cache.peek_next_eviction(), None);
        cache.put(2, 2);
        assert_eq!(cache.insertion_order(), vec![2]);
        cache.check_invariants().unwrap();
    }
}

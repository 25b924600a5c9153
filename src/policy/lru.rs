//! # Least Recently Used (LRU) policy
//!
//! Every counted access, update, or insert moves the key to the
//! most-recently-used end of a recency list; eviction removes the opposite
//! end. The list is an [`OrderList`] (arena-backed doubly linked list with
//! stable handles) plus a key→handle index for O(1) relocation:
//!
//! ```text
//!   index: { a→n2, b→n0, c→n1 }
//!
//!   front ──► [c] ◄──► [b] ◄──► [a] ◄── back
//!             MRU                LRU (evict first)
//! ```
//!
//! | Operation         | Time | Notes                                |
//! |-------------------|------|--------------------------------------|
//! | insert            | O(1) | push at the MRU end                  |
//! | access / update   | O(1) | relocate to the MRU end              |
//! | evict             | O(1) | pop the LRU end                      |
//! | delete            | O(1) | unlink by handle                     |
//! | `peek_lru` / `peek_mru` | O(1) | read-only                      |
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::prelude::*;
//!
//! let mut cache: LruCache<&str, u32> = LruCache::new(3).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//! assert_eq!(cache.access_order(), vec!["c", "b", "a"]);
//!
//! cache.get(&"a");
//! assert_eq!(cache.peek_mru(), Some(&"a"));
//! assert_eq!(cache.peek_lru(), Some(&"b"));
//!
//! cache.put("d", 4); // evicts "b"
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.access_order(), vec!["d", "a", "c"]);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{NodeId, OrderList};
use crate::error::{ConfigError, InvariantError};
use crate::policy::engine::{EvictionStrategy, PolicyCache};
use crate::traits::{CachePolicy, PolicyKind};

/// Recency bookkeeping for [`LruCache`]: MRU at the front of the list.
#[derive(Debug)]
pub struct LruStrategy<K> {
    list: OrderList<K>,
    index: FxHashMap<K, NodeId>,
}

impl<K> Default for LruStrategy<K> {
    fn default() -> Self {
        Self {
            list: OrderList::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<K> LruStrategy<K>
where
    K: Eq + Hash + Clone,
{
    fn promote(&mut self, key: &K) {
        if let Some(&node) = self.index.get(key) {
            self.list.move_to_front(node);
        }
    }
}

impl<K> EvictionStrategy<K> for LruStrategy<K>
where
    K: Eq + Hash + Clone,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn on_insert(&mut self, key: &K) {
        let node = self.list.push_front(key.clone());
        self.index.insert(key.clone(), node);
    }

    fn on_access(&mut self, key: &K) {
        self.promote(key);
    }

    fn on_update(&mut self, key: &K) {
        self.promote(key);
    }

    fn on_delete(&mut self, key: &K) {
        if let Some(node) = self.index.remove(key) {
            self.list.unlink(node);
        }
    }

    fn on_clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    fn evict(&mut self) -> Option<K> {
        let victim = self.list.pop_back()?;
        self.index.remove(&victim);
        Some(victim)
    }

    fn ordered_keys(&self) -> Vec<K> {
        self.list.iter().cloned().collect()
    }
}

/// LRU cache: see the module docs for the eviction contract.
pub type LruCache<K, V> = PolicyCache<K, V, LruStrategy<K>>;

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an LRU cache named `"LRU"`.
    ///
    /// Fails when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_name(capacity, "LRU")
    }

    /// Creates an LRU cache with an explicit instance name.
    pub fn with_name(capacity: usize, name: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_strategy(capacity, name, LruStrategy::default())
    }

    /// Least recently used key, without mutating the order.
    pub fn peek_lru(&self) -> Option<&K> {
        self.strategy().list.back()
    }

    /// Most recently used key, without mutating the order.
    pub fn peek_mru(&self) -> Option<&K> {
        self.strategy().list.front()
    }

    /// Keys from MRU to LRU.
    pub fn access_order(&self) -> Vec<K> {
        self.strategy().ordered_keys()
    }

    /// Verifies the store/list/index correspondence.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let strategy = self.strategy();
        if strategy.list.len() != self.len() || strategy.index.len() != self.len() {
            return Err(InvariantError::new(format!(
                "list len {} / index len {} != entry count {}",
                strategy.list.len(),
                strategy.index.len(),
                self.len()
            )));
        }
        for key in strategy.list.iter() {
            if !self.entry_map().contains_key(key) {
                return Err(InvariantError::new("listed key missing from store"));
            }
            if !strategy.index.contains_key(key) {
                return Err(InvariantError::new("listed key missing from index"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_moves_to_mru() {
        let mut cache: LruCache<char, u32> = LruCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);
        assert_eq!(cache.access_order(), vec!['c', 'b', 'a']);

        cache.get(&'a');
        assert_eq!(cache.access_order(), vec!['a', 'c', 'b']);
        assert_eq!(cache.peek_mru(), Some(&'a'));
        assert_eq!(cache.peek_lru(), Some(&'b'));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn eviction_removes_peeked_lru() {
        let mut cache: LruCache<char, u32> = LruCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);
        cache.get(&'a');

        let victim = *cache.peek_lru().unwrap();
        cache.put('d', 4);
        assert_eq!(victim, 'b');
        assert!(!cache.contains(&'b'));
        assert_eq!(cache.access_order(), vec!['d', 'a', 'c']);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn update_counts_as_access_for_ordering() {
        let mut cache: LruCache<char, u32> = LruCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);

        cache.put('a', 100);
        assert_eq!(cache.peek_mru(), Some(&'a'));
        // Ordering changed, hit/miss counters did not.
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn peeks_do_not_reorder() {
        let mut cache: LruCache<char, u32> = LruCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);

        cache.peek_lru();
        cache.peek_lru();
        cache.peek_mru();
        assert_eq!(cache.access_order(), vec!['b', 'a']);
    }

    #[test]
    fn delete_unlinks_middle_node() {
        let mut cache: LruCache<char, u32> = LruCache::new(3).unwrap();
        cache.put('a', 1);
        cache.put('b', 2);
        cache.put('c', 3);

        assert!(cache.delete(&'b'));
        assert_eq!(cache.access_order(), vec!['c', 'a']);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn empty_cache_peeks_are_none() {
        let cache: LruCache<char, u32> = LruCache::new(3).unwrap();
        assert_eq!(cache.peek_lru(), None);
        assert_eq!(cache.peek_mru(), None);
    }

    #[test]
    fn long_sequence_keeps_invariants() {
        let mut cache: LruCache<u32, u32> = LruCache::new(8).unwrap();
        for i in 0..200 {
            cache.put(i % 13, i);
            if i % 3 == 0 {
                cache.get(&(i % 7));
            }
            if i % 11 == 0 {
                cache.delete(&(i % 5));
            }
            assert!(cache.len() <= 8);
            cache.check_invariants().unwrap();
        }
    }
}

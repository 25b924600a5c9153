//! # Least Frequently Used (LFU) policy
//!
//! Each resident key carries an access frequency: 1 on insert, +1 for every
//! counted access or update. Keys sharing a frequency form a bucket that
//! preserves arrival order into that bucket, and `min_freq` names the lowest
//! populated frequency. Eviction pops the earliest arrival in the `min_freq`
//! bucket, so ties break FIFO:
//!
//! ```text
//!   min_freq = 1
//!
//!   freq 1: [b] ─ [c]          ◄─ eviction pops b
//!   freq 3: [d]
//!   freq 4: [a]
//!
//!   index: { a→(4,·), b→(1,·), c→(1,·), d→(3,·) }
//! ```
//!
//! Each bucket is an [`OrderList`], so a frequency bump unlinks the key from
//! its old bucket and appends it to bucket `freq + 1` in O(1). The one
//! non-constant path is recomputing `min_freq` after a delete or eviction
//! empties the minimum bucket, which scans the remaining populated
//! frequencies.
//!
//! | Operation                 | Time         | Notes                        |
//! |---------------------------|--------------|------------------------------|
//! | insert                    | O(1)         | bucket 1, `min_freq = 1`     |
//! | access / update           | O(1)         | relink into bucket `f + 1`   |
//! | evict                     | O(1) amort.  | pop earliest in `min_freq`   |
//! | delete                    | O(F) worst   | F = populated frequencies    |
//! | `frequency_distribution`  | O(F)         |                              |
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::prelude::*;
//!
//! let mut cache: LfuCache<&str, u32> = LfuCache::new(3).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! cache.get(&"a");
//! cache.get(&"a");
//! cache.get(&"b");
//! assert_eq!(cache.frequency(&"a"), Some(3));
//! assert_eq!(cache.peek_lfu(), Some(&"c"));
//!
//! cache.put("d", 4); // evicts "c", the only frequency-1 key
//! assert!(!cache.contains(&"c"));
//! assert_eq!(cache.min_frequency(), 1); // "d" arrived at frequency 1
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{NodeId, OrderList};
use crate::error::{ConfigError, InvariantError};
use crate::policy::engine::{EvictionStrategy, PolicyCache};
use crate::traits::{CachePolicy, PolicyKind};

/// Frequency bookkeeping for [`LfuCache`].
#[derive(Debug)]
pub struct LfuStrategy<K> {
    buckets: FxHashMap<u64, OrderList<K>>,
    index: FxHashMap<K, (u64, NodeId)>,
    min_freq: u64,
}

impl<K> Default for LfuStrategy<K> {
    fn default() -> Self {
        Self {
            buckets: FxHashMap::default(),
            index: FxHashMap::default(),
            min_freq: 0,
        }
    }
}

impl<K> LfuStrategy<K>
where
    K: Eq + Hash + Clone,
{
    /// Unlinks `key` from its current bucket, pruning the bucket if emptied.
    /// Returns the key's frequency, or `None` if untracked.
    fn detach(&mut self, key: &K) -> Option<u64> {
        let (freq, node) = self.index.remove(key)?;
        let bucket = self
            .buckets
            .get_mut(&freq)
            .expect("indexed frequency has no bucket");
        bucket.unlink(node);
        if bucket.is_empty() {
            self.buckets.remove(&freq);
        }
        Some(freq)
    }

    /// Moves `key` one frequency up. Bumping out of an emptied `min_freq`
    /// bucket can only shift the minimum to `freq + 1`.
    fn bump(&mut self, key: &K) {
        let Some(freq) = self.detach(key) else {
            return;
        };
        if freq == self.min_freq && !self.buckets.contains_key(&freq) {
            self.min_freq = freq + 1;
        }
        self.attach(key.clone(), freq + 1);
    }

    fn attach(&mut self, key: K, freq: u64) {
        let node = self
            .buckets
            .entry(freq)
            .or_insert_with(OrderList::new)
            .push_back(key.clone());
        self.index.insert(key, (freq, node));
    }

    /// Smallest populated frequency, or 0 when empty. Linear in the number
    /// of populated frequencies; only the delete and evict paths need it.
    fn recompute_min_freq(&mut self) {
        self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
    }

    fn active_frequencies(&self) -> Vec<u64> {
        let mut freqs: Vec<u64> = self.buckets.keys().copied().collect();
        freqs.sort_unstable();
        freqs
    }
}

impl<K> EvictionStrategy<K> for LfuStrategy<K>
where
    K: Eq + Hash + Clone,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn on_insert(&mut self, key: &K) {
        self.attach(key.clone(), 1);
        self.min_freq = 1;
    }

    fn on_access(&mut self, key: &K) {
        self.bump(key);
    }

    fn on_update(&mut self, key: &K) {
        self.bump(key);
    }

    fn on_delete(&mut self, key: &K) {
        if let Some(freq) = self.detach(key) {
            if freq == self.min_freq && !self.buckets.contains_key(&freq) {
                self.recompute_min_freq();
            }
        }
    }

    fn on_clear(&mut self) {
        self.buckets.clear();
        self.index.clear();
        self.min_freq = 0;
    }

    fn evict(&mut self) -> Option<K> {
        let bucket = self.buckets.get_mut(&self.min_freq)?;
        let victim = bucket.pop_front()?;
        self.index.remove(&victim);
        if bucket.is_empty() {
            self.buckets.remove(&self.min_freq);
            self.recompute_min_freq();
        }
        Some(victim)
    }

    fn ordered_keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.index.len());
        for freq in self.active_frequencies() {
            keys.extend(self.buckets[&freq].iter().cloned());
        }
        keys
    }
}

/// LFU cache: see the module docs for the eviction contract.
pub type LfuCache<K, V> = PolicyCache<K, V, LfuStrategy<K>>;

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an LFU cache named `"LFU"`.
    ///
    /// Fails when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_name(capacity, "LFU")
    }

    /// Creates an LFU cache with an explicit instance name.
    pub fn with_name(capacity: usize, name: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_strategy(capacity, name, LfuStrategy::default())
    }

    /// Key that the next eviction would remove, without mutating anything:
    /// the earliest arrival in the minimum-frequency bucket.
    pub fn peek_lfu(&self) -> Option<&K> {
        let strategy = self.strategy();
        strategy.buckets.get(&strategy.min_freq)?.front()
    }

    /// Access frequency of `key`, or `None` if absent. Does not count as an
    /// access.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.strategy().index.get(key).map(|&(freq, _)| freq)
    }

    /// Lowest populated frequency, or 0 when the cache is empty.
    pub fn min_frequency(&self) -> u64 {
        self.strategy().min_freq
    }

    /// Populated frequencies with their bucket sizes, ascending.
    pub fn frequency_distribution(&self) -> Vec<(u64, usize)> {
        let strategy = self.strategy();
        strategy
            .active_frequencies()
            .into_iter()
            .map(|freq| (freq, strategy.buckets[&freq].len()))
            .collect()
    }

    /// Keys grouped by frequency, ascending; bucket arrival order within
    /// each group.
    pub fn keys_by_frequency(&self) -> Vec<(u64, Vec<K>)> {
        let strategy = self.strategy();
        strategy
            .active_frequencies()
            .into_iter()
            .map(|freq| (freq, strategy.buckets[&freq].iter().cloned().collect()))
            .collect()
    }

    /// Verifies the store/buckets/index/`min_freq` correspondence.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let strategy = self.strategy();
        if strategy.index.len() != self.len() {
            return Err(InvariantError::new(format!(
                "index len {} != entry count {}",
                strategy.index.len(),
                self.len()
            )));
        }

        let mut bucketed = 0usize;
        for (freq, bucket) in &strategy.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("empty bucket at frequency {freq}")));
            }
            bucketed += bucket.len();
            for key in bucket.iter() {
                if !self.entry_map().contains_key(key) {
                    return Err(InvariantError::new("bucketed key missing from store"));
                }
                match strategy.index.get(key) {
                    Some(&(indexed_freq, _)) if indexed_freq == *freq => {}
                    _ => {
                        return Err(InvariantError::new(
                            "key frequency disagrees between bucket and index",
                        ))
                    }
                }
            }
        }
        if bucketed != self.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {} keys, store holds {}",
                bucketed,
                self.len()
            )));
        }

        let smallest = strategy.buckets.keys().copied().min().unwrap_or(0);
        if strategy.min_freq != smallest {
            return Err(InvariantError::new(format!(
                "min_freq is {} but smallest populated frequency is {}",
                strategy.min_freq, smallest
            )));
        }
        Ok(())
    }
}

//! Shared policy lifecycle engine.
//!
//! [`PolicyCache`] owns the pieces every eviction policy needs — the
//! key→entry map, the capacity bound, the instance name and the
//! [`CacheStats`] counters — and drives them through one code path. The
//! policy-specific part is confined to an [`EvictionStrategy`] value that
//! maintains the ordering structures through a small hook set.
//!
//! ## Lifecycle
//!
//! ```text
//!   get(k)  ── hit ──► stats.hits += 1, entry.touch(), strategy.on_access(k)
//!           └─ miss ─► stats.misses += 1
//!
//!   put(k, v) ── known key ──► overwrite value/size, strategy.on_update(k)
//!             └─ new key ────► if len == capacity { strategy.evict() → remove victim,
//!                                                   stats.evictions += 1 }
//!                              insert entry, strategy.on_insert(k)
//!
//!   delete(k) ──► strategy.on_delete(k), remove entry
//!   clear()   ──► strategy.on_clear(), entries.clear()   (counters survive)
//! ```
//!
//! The engine recomputes `stats.current_size` from the entry map after every
//! mutation, so the published size can never drift from the store.
//!
//! Invariant held across all operations: a key is present in the entry map
//! if and only if the strategy tracks it, and `len() <= capacity()`.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::stats::{CacheEntry, CacheStats};
use crate::traits::{CachePolicy, PolicyKind};

/// Hook set a policy variant implements to steer eviction.
///
/// The engine calls exactly one hook per lifecycle event. `evict` must
/// remove exactly one key from the strategy's own structures and return it;
/// the engine removes the corresponding entry and counts the eviction.
pub trait EvictionStrategy<K> {
    /// Discriminant tag for this strategy.
    fn kind(&self) -> PolicyKind;

    /// A new key was inserted into the store.
    fn on_insert(&mut self, key: &K);

    /// An existing key was read through `get`.
    fn on_access(&mut self, key: &K);

    /// An existing key was overwritten through `put`.
    fn on_update(&mut self, key: &K);

    /// A key is being removed through `delete`.
    fn on_delete(&mut self, key: &K);

    /// The store was emptied.
    fn on_clear(&mut self);

    /// Chooses and removes the next victim, returning its key.
    fn evict(&mut self) -> Option<K>;

    /// Keys in this policy's native order.
    fn ordered_keys(&self) -> Vec<K>;
}

/// A bounded cache: entry store + statistics + one eviction strategy.
///
/// Use the policy aliases ([`FifoCache`](crate::policy::FifoCache),
/// [`LruCache`](crate::policy::LruCache),
/// [`LfuCache`](crate::policy::LfuCache)) rather than naming this type
/// directly.
#[derive(Debug)]
pub struct PolicyCache<K, V, S> {
    capacity: usize,
    name: String,
    entries: FxHashMap<K, CacheEntry<V>>,
    stats: CacheStats,
    strategy: S,
}

impl<K, V, S> PolicyCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: EvictionStrategy<K>,
{
    pub(crate) fn with_strategy(
        capacity: usize,
        name: impl Into<String>,
        strategy: S,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be a positive integer"));
        }
        Ok(Self {
            capacity,
            name: name.into(),
            entries: FxHashMap::default(),
            stats: CacheStats::for_capacity(capacity),
            strategy,
        })
    }

    pub(crate) fn strategy(&self) -> &S {
        &self.strategy
    }

    pub(crate) fn entry_map(&self) -> &FxHashMap<K, CacheEntry<V>> {
        &self.entries
    }

    fn sync_size(&mut self) {
        self.stats.current_size = self.entries.len();
    }

    /// Removes exactly one entry chosen by the strategy.
    fn evict_one(&mut self) {
        if let Some(victim) = self.strategy.evict() {
            self.entries.remove(&victim);
            self.stats.evictions += 1;
        }
        self.sync_size();
    }
}

impl<K, V, S> CachePolicy<K, V> for PolicyCache<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: EvictionStrategy<K>,
{
    fn kind(&self) -> PolicyKind {
        self.strategy.kind()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if let Some(entry) = self.entries.get_mut(key) {
            self.stats.hits += 1;
            entry.touch();
            self.strategy.on_access(key);
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    fn put_sized(&mut self, key: K, value: V, size: usize) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.size = size;
            entry.touch();
            self.strategy.on_update(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_one();
        }
        self.entries.insert(key.clone(), CacheEntry::new(value, size));
        self.strategy.on_insert(&key);
        self.sync_size();
    }

    fn delete(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.strategy.on_delete(key);
            self.sync_size();
            true
        } else {
            false
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn peek_entry(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.strategy.on_clear();
        self.sync_size();
    }

    fn keys(&self) -> Vec<K> {
        self.strategy.ordered_keys()
    }

    fn items(&self) -> Vec<(K, V)> {
        self.strategy
            .ordered_keys()
            .into_iter()
            .filter_map(|key| {
                let value = self.entries.get(&key)?.value.clone();
                Some((key, value))
            })
            .collect()
    }

    fn reset_stats(&mut self) {
        let size = self.entries.len();
        self.stats.reset(size);
    }
}

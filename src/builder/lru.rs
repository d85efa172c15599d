//! Bounded least-recently-used cache
//!
//! Sits in front of the builder's working tables so that the common case of
//! a recently-seen key or filter value never re-scans the table, while
//! memory stays bounded regardless of corpus size.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Fixed-capacity LRU map.
///
/// Recency is tracked with a monotonic tick; eviction removes the entry
/// with the oldest tick.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: HashMap<K, (V, u64)>,
    by_age: BTreeMap<u64, K>,
    tick: u64,
}

impl<K: Eq + Hash + Clone, V: Clone> LruCache<K, V> {
    /// Cache holding at most `capacity` entries. Capacity 0 disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            by_age: BTreeMap::new(),
            tick: 0,
        }
    }

    /// Look up a key, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.tick += 1;
        let tick = self.tick;
        let (value, age) = self.entries.get_mut(key)?;
        let old_age = *age;
        *age = tick;
        let value = value.clone();
        self.by_age.remove(&old_age);
        self.by_age.insert(tick, key.clone());
        Some(value)
    }

    /// Insert a key, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        self.tick += 1;

        if let Some((_, old_age)) = self.entries.get(&key) {
            self.by_age.remove(old_age);
        } else if self.entries.len() >= self.capacity {
            if let Some((_, evicted)) = self.by_age.pop_first() {
                self.entries.remove(&evicted);
            }
        }

        self.entries.insert(key.clone(), (value, self.tick));
        self.by_age.insert(self.tick, key);
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

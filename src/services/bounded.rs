//! Insertion-ordered map that forgets its oldest entries past a limit.
//!
//! The console keeps every conversation, wizard and view scope in memory
//! with no owner to clean up after an abandoned tab, so each store caps
//! itself the way the toast feed does.

use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct BoundedMap<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    limit: usize,
}

impl<K: Eq + Hash + Clone, V> BoundedMap<K, V> {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new(), limit: limit.max(1) }
    }

    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Insert or replace `key`. Replacing keeps the entry's age; a new key
    /// past the limit pushes out the oldest entries, which are returned.
    pub fn insert(&mut self, key: K, value: V) -> Vec<(K, V)> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return Vec::new();
        }
        let evicted = self.make_room();
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    /// Existing entry for `key`, or a fresh one from `make`.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        if !self.entries.contains_key(&key) {
            self.make_room();
            self.order.push_back(key.clone());
        }
        self.entries.entry(key).or_insert_with(make)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let value = self.entries.remove(key)?;
        self.order.retain(|k| <K as Borrow<Q>>::borrow(k) != key);
        Some(value)
    }

    fn make_room(&mut self) -> Vec<(K, V)> {
        let mut evicted = Vec::new();
        while self.entries.len() >= self.limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(value) = self.entries.remove(&oldest) {
                evicted.push((oldest, value));
            }
        }
        evicted
    }
}

#[cfg(test)]
#[path = "bounded_test.rs"]
mod tests;

//! Concurrent deduplication of reported locations.

use std::hash::Hash;

use dashmap::DashSet;

/// Per-query set of already reported identities.
///
/// Shared between all workers of one search. [`VisitedSet::insert`] is the only mutation and
/// is atomic, so exactly one worker wins for every key.
#[derive(Debug)]
pub struct VisitedSet<K: Eq + Hash> {
    seen: DashSet<K>,
}

impl<K: Eq + Hash> Default for VisitedSet<K> {
    fn default() -> Self {
        Self {
            seen: DashSet::new(),
        }
    }
}

impl<K: Eq + Hash> VisitedSet<K> {
    /// Creates an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, returning `true` if it was not present before
    pub fn insert(&self, key: K) -> bool {
        self.seen.insert(key)
    }

    /// Returns `true` if `key` was inserted before
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.seen.contains(key)
    }

    /// Number of distinct keys inserted
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if nothing was inserted yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rayon::prelude::*;

    use super::*;

    #[test]
    fn test_insert_reports_first_insertion_only() {
        let set = VisitedSet::new();
        assert!(set.insert(7u32));
        assert!(!set.insert(7u32));
        assert!(set.contains(&7));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_concurrent_insert_has_one_winner() {
        let set = Arc::new(VisitedSet::new());
        let winners: usize = (0..64)
            .into_par_iter()
            .map(|_| usize::from(set.insert("key")))
            .sum();
        assert_eq!(winners, 1);
    }
}

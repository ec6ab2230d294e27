//! Recency index: key -> handle lookup over the recency list
//!
//! Holds handles only; never owns entries and never touches links.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::list::Handle;

pub(crate) struct RecencyIndex<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K> RecencyIndex<K>
where
    K: Hash + Eq,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn lookup(&self, key: &K) -> Option<Handle> {
        self.map.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<Handle> {
        self.map.remove(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, Handle)> + '_ {
        self.map.iter().map(|(key, handle)| (key, *handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::RecencyList;

    #[test]
    fn test_index_tracks_membership() {
        let mut list = RecencyList::with_capacity(2);
        let mut index = RecencyIndex::with_capacity(2);

        let h = list.push_front("a", 1);
        assert!(!index.contains(&"a"));
        assert_eq!(index.insert("a", h), None);

        assert!(index.contains(&"a"));
        assert_eq!(index.lookup(&"a"), Some(h));
        assert_eq!(index.len(), 1);

        assert_eq!(index.remove(&"a"), Some(h));
        assert!(!index.contains(&"a"));
        assert_eq!(index.lookup(&"a"), None);
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut index: RecencyIndex<u64> = RecencyIndex::with_capacity(1);
        assert_eq!(index.remove(&42), None);
    }

    #[test]
    fn test_iter_yields_all_pairs() {
        let mut list = RecencyList::with_capacity(3);
        let mut index = RecencyIndex::with_capacity(3);
        for key in 0..3u32 {
            let h = list.push_front(key, ());
            index.insert(key, h);
        }

        let mut keys: Vec<u32> = index.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![0, 1, 2]);
        for (key, handle) in index.iter() {
            assert_eq!(list[handle].key(), key);
        }
    }
}

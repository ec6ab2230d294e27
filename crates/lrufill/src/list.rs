//! Recency list: resident entries ordered from most to least recently used
//!
//! Entries live in an arena of slots; `prev`/`next` links are slot handles,
//! so splicing and eviction are index rewrites. Freed slots are reused.

use std::ops::Index;

use crate::error::{Error, Result};

/// Stable handle to an entry slot in the recency list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

/// One resident cache line
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<Handle>,
    next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }
}

/// Doubly-linked MRU -> LRU ordering backed by an arena
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list with room for `capacity` entries
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle.0).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle.0).and_then(|slot| slot.as_mut())
    }

    /// Make a new entry the most recently used one
    pub(crate) fn push_front(&mut self, key: K, value: V) -> Handle {
        let entry = Entry {
            key,
            value,
            prev: None,
            next: None,
        };

        let handle = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                Handle(idx)
            }
            None => {
                self.slots.push(Some(entry));
                Handle(self.slots.len() - 1)
            }
        };

        self.attach_front(handle);
        self.len += 1;
        handle
    }

    /// Reposition a resident entry at the head without allocating
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.get(handle).is_none() {
            return;
        }

        self.unlink(handle);
        self.attach_front(handle);
    }

    /// Remove and return the least recently used entry
    pub(crate) fn evict_tail(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.unlink(tail);

        let entry = self.slots.get_mut(tail.0)?.take()?;
        self.free_list.push(tail.0);
        self.len -= 1;
        Some(entry)
    }

    /// Walk entries from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Verify head/tail pointers and both link directions
    pub(crate) fn check_links(&self) -> Result<()> {
        let mut prev: Option<Handle> = None;
        let mut cursor = self.head;
        let mut seen = 0usize;

        while let Some(handle) = cursor {
            let entry = self
                .get(handle)
                .ok_or_else(|| Error::invariant(format!("link to empty slot {}", handle.0)))?;

            if entry.prev != prev {
                return Err(Error::invariant(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    handle.0, entry.prev, prev
                )));
            }

            seen += 1;
            if seen > self.len {
                return Err(Error::invariant("recency list contains a cycle"));
            }

            prev = cursor;
            cursor = entry.next;
        }

        if seen != self.len {
            return Err(Error::invariant(format!(
                "walked {} entries but length is {}",
                seen, self.len
            )));
        }
        if self.tail != prev {
            return Err(Error::invariant(format!(
                "tail is {:?} but last linked entry is {:?}",
                self.tail, prev
            )));
        }

        Ok(())
    }

    fn attach_front(&mut self, handle: Handle) {
        let old_head = self.head;

        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = old_head;
        }

        if let Some(head) = old_head.and_then(|h| self.get_mut(h)) {
            head.prev = Some(handle);
        }

        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = match self.get(handle) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev.and_then(|p| self.get_mut(p)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }

        match next.and_then(|n| self.get_mut(n)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<K, V> Index<Handle> for RecencyList<K, V> {
    type Output = Entry<K, V>;

    /// Panics on a handle whose entry has been evicted; the cache only
    /// indexes with handles it has just looked up or created.
    fn index(&self, handle: Handle) -> &Self::Output {
        match self.get(handle) {
            Some(entry) => entry,
            None => panic!("stale recency handle {}", handle.0),
        }
    }
}

/// Iterator over entries, most recently used first
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

//! LRU (Least Recently Used) engine
//!
//! Entries live in an arena of slots. The recency list links slots by
//! index, head = most recently used, tail = least recently used. Freed
//! slots go on a free list and are reused before the arena grows, so the
//! arena never holds more than `capacity` slots.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::error::{Error, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand
const PREALLOC_LIMIT: usize = 1024;

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Outcome of [`Lru::insert`]
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion<K, V> {
    /// Key was already present; the pair is handed back and nothing changed
    Rejected(K, V),
    /// Pair is now the most recently used entry
    Inserted,
    /// Pair is now the most recently used entry; the previous tail was evicted
    Evicted(K, V),
}

/// Unsynchronized LRU map with fixed capacity
///
/// Insertion never overwrites: a duplicate key is rejected. Wrap it in a
/// lock to share it (see [`LruCache`](crate::LruCache)).
pub struct Lru<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> Lru<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty LRU with the given capacity
    ///
    /// # Errors
    /// * [`Error::ZeroCapacity`] if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        let reserve = capacity.min(PREALLOC_LIMIT);

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            nodes: Vec::with_capacity(reserve),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Get a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a value without touching its recency
    #[cfg(test)]
    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Check for a key without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert a new key-value pair at the head
    ///
    /// Evicts the tail first when the cache is full. An existing key is
    /// left as is and the pair comes back as [`Insertion::Rejected`].
    pub fn insert(&mut self, key: K, value: V) -> Insertion<K, V> {
        if self.map.contains_key(&key) {
            return Insertion::Rejected(key, value);
        }

        let evicted = if self.map.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.map.insert(key, idx);

        match evicted {
            Some((old_key, old_value)) => Insertion::Evicted(old_key, old_value),
            None => Insertion::Inserted,
        }
    }

    /// Remove a key, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        let node = self.nodes[idx].take();
        self.free_node(idx);
        node.map(|node| node.value)
    }

    /// Remove and return the least recently used pair
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_node(idx);
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate keys from most to least recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            nodes: &self.nodes,
            next: self.head,
        }
    }

    /// Verify that the index and the recency list describe the same entries
    ///
    /// Walks the list from head to tail checking links, then checks that
    /// every linked slot is indexed under its own key, that the counts
    /// agree and stay within capacity, and that free slots are empty.
    pub fn check_invariants(&self) -> Result<()> {
        let mut count = 0usize;
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            if count >= self.nodes.len() {
                return Err(invariant("recency list contains a cycle"));
            }

            let node = self
                .nodes
                .get(idx)
                .and_then(Option::as_ref)
                .ok_or_else(|| invariant(format!("slot {} is linked but empty", idx)))?;

            if node.prev != prev {
                return Err(invariant(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    idx, node.prev, prev
                )));
            }

            match self.map.get(&node.key) {
                Some(&mapped) if mapped == idx => {}
                other => {
                    return Err(invariant(format!(
                        "slot {} is indexed as {:?}",
                        idx, other
                    )));
                }
            }

            count += 1;
            prev = Some(idx);
            cursor = node.next;
        }

        if self.tail != prev {
            return Err(invariant(format!(
                "tail is {:?}, list ends at {:?}",
                self.tail, prev
            )));
        }

        if count != self.map.len() {
            return Err(invariant(format!(
                "list holds {} entries, index holds {}",
                count,
                self.map.len()
            )));
        }

        if count > self.capacity {
            return Err(invariant(format!(
                "{} entries exceed capacity {}",
                count, self.capacity
            )));
        }

        if let Some(&idx) = self.free_list.iter().find(|&&idx| self.nodes[idx].is_some()) {
            return Err(invariant(format!("free slot {} is occupied", idx)));
        }

        if count + self.free_list.len() != self.nodes.len() {
            return Err(invariant(format!(
                "{} live + {} free slots != {} allocated",
                count,
                self.free_list.len(),
                self.nodes.len()
            )));
        }

        Ok(())
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.nodes[head_idx] {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &mut self.nodes[idx] {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }

    #[cfg(test)]
    fn allocated_slots(&self) -> usize {
        self.nodes.len()
    }
}

fn invariant(msg: impl Into<String>) -> Error {
    Error::Invariant(msg.into())
}

/// Iterator over keys, most recently used first
pub struct Keys<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    next: Option<usize>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.nodes.get(idx)?.as_ref()?;
        self.next = node.next;
        Some(&node.key)
    }
}

//! LruCache: thread-safe string cache over the LRU engine

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::lru::{Insertion, Lru};

/// Fixed-capacity LRU cache of string keys and values
///
/// The index and the recency list sit behind one mutex. Every operation,
/// `get` included, holds it for its whole body because a hit reorders the
/// list. Share it across threads with `Arc<LruCache>`.
pub struct LruCache {
    /// Index and recency list
    inner: Mutex<Lru<String, String>>,

    /// Cache capacity
    capacity: usize,
}

impl LruCache {
    /// Create an empty cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, fixed for the cache's lifetime
    ///
    /// # Returns
    /// * `Result<LruCache>` - [`Error::ZeroCapacity`](crate::Error::ZeroCapacity) if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        let lru = Lru::new(capacity)?;
        debug!(capacity, "LRU cache created");

        Ok(Self {
            inner: Mutex::new(lru),
            capacity,
        })
    }

    /// Add a new entry as the most recently used
    ///
    /// Evicts the least recently used entry when full.
    ///
    /// # Returns
    /// * `false` if the key is already cached; the existing entry keeps
    ///   its value and position
    pub fn add(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let mut lru = self.inner.lock();

        match lru.insert(key.into(), value.into()) {
            Insertion::Inserted => true,
            Insertion::Evicted(evicted, _) => {
                trace!(key = %evicted, "evicted least recently used entry");
                true
            }
            Insertion::Rejected(key, _) => {
                trace!(key = %key, "duplicate key rejected");
                false
            }
        }
    }

    /// Get a value and mark its entry most recently used
    ///
    /// # Returns
    /// * `Option<String>` - Copy of the cached value, `None` on a miss
    pub fn get(&self, key: &str) -> Option<String> {
        let mut lru = self.inner.lock();
        lru.get(key).cloned()
    }

    /// Remove an entry
    ///
    /// # Returns
    /// * `false` if the key was not cached
    pub fn remove(&self, key: &str) -> bool {
        let mut lru = self.inner.lock();
        let removed = lru.remove(key).is_some();
        if removed {
            trace!(key, "removed entry");
        }
        removed
    }

    /// Check for a key without changing its recency
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Snapshot of cached keys, most recently used first
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys().cloned().collect()
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Verify index/list consistency under the lock
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }
}

//! # lrucache
//!
//! Fixed-capacity, thread-safe LRU cache of string keys and values.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1))
//! - **LRU List**: Doubly-linked list over slot indices for promotion and eviction (O(1))
//! - **Locking**: One `parking_lot::Mutex` around both, taken by every operation
//!
//! ## Semantics
//! - `add` never overwrites; a duplicate key returns `false`
//! - `get` promotes the entry to most recently used on every hit
//! - `remove` never evicts anything else
//! - A full cache evicts its least recently used entry on `add`
//!
//! ```
//! use lrucache::LruCache;
//!
//! let cache = LruCache::new(2).unwrap();
//! assert!(cache.add("a", "1"));
//! assert!(cache.add("b", "2"));
//! assert_eq!(cache.get("a").as_deref(), Some("1"));
//! assert!(cache.add("c", "3")); // evicts "b"
//! assert_eq!(cache.get("b"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;

pub use cache::LruCache;
pub use error::{Error, Result};

//! The public, thread-safe [`Cache`] type.

use parking_lot::Mutex;

use crate::arena::CacheCore;
use crate::config::CacheConfig;
use crate::error::CacheError;

/// A bounded, thread-safe, string-keyed LRU cache.
///
/// All operations take a single internal lock. There is no lock striping
/// or segment sharding: at this scale a single mutex keeps every operation
/// linearizable without the bookkeeping a sharded design would add.
///
/// # Examples
///
/// ```
/// use kv_cache::{Cache, config::CacheConfig};
/// use core::num::NonZeroUsize;
///
/// let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(2).unwrap() });
/// cache.put("a".to_string(), "1".to_string()).unwrap();
/// cache.put("b".to_string(), "2".to_string()).unwrap();
/// assert_eq!(cache.get("a"), Some("1".to_string()));
///
/// cache.put("c".to_string(), "3".to_string()).unwrap(); // evicts "b", least recently used
/// assert_eq!(cache.get("b"), None);
/// ```
#[derive(Debug)]
pub struct Cache {
    inner: Mutex<CacheCore>,
    capacity: usize,
}

impl Cache {
    /// Builds an empty cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Cache {
            capacity: config.capacity.get(),
            inner: Mutex::new(CacheCore::new(config)),
        }
    }

    /// Inserts or overwrites `key`, promoting it to most-recently-used.
    ///
    /// If the cache is at capacity and `key` is new, the least-recently-used
    /// entry is evicted first.
    pub fn put(&self, key: String, value: String) -> Result<(), CacheError> {
        self.inner.lock().put(key, value)
    }

    /// Looks up `key`, promoting it to most-recently-used on a hit.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key)
    }

    /// Removes `key` if present. Returns whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

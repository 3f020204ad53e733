//! Configuration for [`crate::Cache`].

use core::num::NonZeroUsize;

/// Sizing parameters for a [`crate::Cache`].
///
/// # Examples
///
/// ```
/// use kv_cache::config::CacheConfig;
/// use core::num::NonZeroUsize;
///
/// let config = CacheConfig {
///     capacity: NonZeroUsize::new(1000).unwrap(),
/// };
/// assert_eq!(config.bucket_count(), 2001);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum number of live entries the cache holds before eviction
    /// kicks in.
    pub capacity: NonZeroUsize,
}

impl CacheConfig {
    /// Number of hash buckets backing the cache (`2 * capacity + 1`, which
    /// keeps the load factor comfortably below 1 even at full capacity).
    pub fn bucket_count(&self) -> usize {
        self.capacity.get() * 2 + 1
    }
}

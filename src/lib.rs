//! A bounded, thread-safe LRU cache for string keys and values.
//!
//! This crate implements the in-process cache tier of a two-sided
//! benchmarking harness: a key-value HTTP server backed by relational
//! storage, fronted by this cache so that hot keys avoid a database
//! round trip. The cache is intentionally narrow: one eviction policy
//! (LRU), one key/value shape (`String`/`String`), one locking strategy
//! (a single mutex around the whole structure).
//!
//! ```
//! use kv_cache::{Cache, config::CacheConfig};
//! use core::num::NonZeroUsize;
//!
//! let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(1000).unwrap() });
//! cache.put("user:42".to_string(), "{\"name\":\"ada\"}".to_string()).unwrap();
//! assert_eq!(cache.get("user:42"), Some("{\"name\":\"ada\"}".to_string()));
//! ```

mod arena;
mod hash;

pub mod cache;
pub mod config;
pub mod error;

pub use cache::Cache;
pub use error::CacheError;

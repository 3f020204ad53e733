//! Error type returned by [`crate::Cache`] operations.

use thiserror::Error;

/// Failure modes for cache operations.
///
/// `get`/`delete` use `Option`/`bool` return shapes for the common
/// not-found case (see [`crate::Cache::get`], [`crate::Cache::delete`]);
/// this type only covers the allocation-failure path `put` can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The cache could not allocate a slot for a new entry. Unreachable in
    /// the current arena implementation (the arena grows on demand and
    /// eviction always frees a slot before an insert needs one), but kept
    /// in the public `put` signature so callers have somewhere to route a
    /// future allocation failure without a breaking API change.
    #[error("cache allocation failure")]
    AllocationFailure,
}

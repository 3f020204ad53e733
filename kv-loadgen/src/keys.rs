//! Synthetic key naming for generated load.

/// A key guaranteed not to collide within a run, used for POSTs and for
/// DELETE/GET fallbacks when the registry has nothing to offer.
pub fn synthetic(prefix: &str, driver_id: usize, seq: u64) -> String {
    format!("{prefix}_thr{driver_id}_seq{seq}")
}

/// A key guaranteed to miss, used by `get-all` and mix-mode GET fallback.
pub fn synthetic_unique(prefix: &str, driver_id: usize, seq: u64) -> String {
    format!("{prefix}_unique_thr{driver_id}_seq{seq}")
}

/// A popular seed key, one of `popular_size` keys pre-populated before a
/// run so `get-popular` has a working set that fits in the server cache.
pub fn popular(prefix: &str, i: usize) -> String {
    format!("{prefix}_pop_{i}")
}

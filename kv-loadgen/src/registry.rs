//! Live-key registry: the generator-side pool of keys believed to
//! exist on the server.
//!
//! Backed by a bounded `Vec<String>` under one mutex rather than the
//! original's fixed-capacity array, since `capacity` here is only ever an
//! upper bound checked before insert — a `Vec` gives the same O(1)
//! `try_add`/`remove_random` behavior without a separate `count` field to
//! keep in sync.

use parking_lot::Mutex;
use rand::Rng;

/// Bounded, best-effort set of keys known to exist on the server.
///
/// Staleness is tolerated by design: a key returned by [`Registry::pick_random`]
/// may be removed by a concurrent [`Registry::remove_random`] before the
/// caller acts on it.
pub struct Registry {
    capacity: usize,
    keys: Mutex<Vec<String>>,
}

impl Registry {
    /// Builds an empty registry bounded to `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Registry { capacity, keys: Mutex::new(Vec::with_capacity(capacity)) }
    }

    /// Inserts `key` if there is room. Returns `false` when full; callers
    /// drop the key silently rather than retrying.
    pub fn try_add(&self, key: String) -> bool {
        let mut keys = self.keys.lock();
        if keys.len() >= self.capacity {
            return false;
        }
        keys.push(key);
        true
    }

    /// Returns an owned copy of a uniformly chosen live key, or `None` if
    /// the registry is empty. The copy is made inside the critical section
    /// so no borrow escapes past the lock.
    pub fn pick_random(&self, rng: &mut impl Rng) -> Option<String> {
        let keys = self.keys.lock();
        if keys.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..keys.len());
        Some(keys[i].clone())
    }

    /// Uniformly removes and returns a key, swapping the last element into
    /// its slot to keep removal O(1). `None` if empty.
    pub fn remove_random(&self, rng: &mut impl Rng) -> Option<String> {
        let mut keys = self.keys.lock();
        if keys.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..keys.len());
        Some(keys.swap_remove(i))
    }

    /// Current number of live keys.
    pub fn count(&self) -> usize {
        self.keys.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(7)
    }

    #[test]
    fn try_add_respects_capacity() {
        let r = Registry::new(2);
        assert!(r.try_add("a".into()));
        assert!(r.try_add("b".into()));
        assert!(!r.try_add("c".into()));
        assert_eq!(r.count(), 2);
    }

    #[test]
    fn remove_random_on_empty_returns_none() {
        let r = Registry::new(4);
        assert_eq!(r.remove_random(&mut rng()), None);
    }

    #[test]
    fn count_tracks_successful_add_and_remove() {
        let r = Registry::new(8);
        for k in ["a", "b", "c"] {
            r.try_add(k.to_string());
        }
        assert_eq!(r.count(), 3);
        r.remove_random(&mut rng());
        assert_eq!(r.count(), 2);
    }

    #[test]
    fn pick_random_never_mutates_count() {
        let r = Registry::new(8);
        for k in ["a", "b", "c"] {
            r.try_add(k.to_string());
        }
        let mut rng = rng();
        for _ in 0..10 {
            r.pick_random(&mut rng);
        }
        assert_eq!(r.count(), 3);
    }

    #[test]
    fn add_then_remove_sequence_keeps_count_in_bounds() {
        let r = Registry::new(5);
        let mut rng = rng();
        for i in 0..50 {
            if i % 2 == 0 {
                r.try_add(format!("k{i}"));
            } else {
                r.remove_random(&mut rng);
            }
            assert!(r.count() <= 5);
        }
    }
}

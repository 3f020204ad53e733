use core::num::NonZeroUsize;
use kv_cache::{config::CacheConfig, Cache};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum CacheOp {
    Put(String, String),
    Get(String),
    Delete(String),
}

fn small_key() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|n| format!("k{n}"))
}

fn cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (small_key(), any::<u16>()).prop_map(|(k, v)| CacheOp::Put(k, v.to_string())),
        small_key().prop_map(CacheOp::Get),
        small_key().prop_map(CacheOp::Delete),
    ]
}

proptest! {
    /// `size <= capacity` must hold after every operation in the sequence,
    /// regardless of how puts, gets, and deletes interleave.
    #[test]
    fn size_never_exceeds_capacity(ops in prop::collection::vec(cache_op(), 0..200)) {
        let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(4).unwrap() });
        for op in ops {
            match op {
                CacheOp::Put(k, v) => { cache.put(k, v).unwrap(); }
                CacheOp::Get(k) => { cache.get(&k); }
                CacheOp::Delete(k) => { cache.delete(&k); }
            }
            prop_assert!(cache.len() <= cache.capacity());
        }
    }

    /// A `get` immediately following a `put` of the same key, with nothing
    /// in between, always observes the value just written.
    #[test]
    fn get_after_put_returns_the_value(key in small_key(), value in any::<u16>().prop_map(|v| v.to_string())) {
        let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(4).unwrap() });
        cache.put(key.clone(), value.clone()).unwrap();
        prop_assert_eq!(cache.get(&key), Some(value));
    }
}

#[test]
fn capacity_plus_one_distinct_puts_with_no_gets_evicts_first_inserted() {
    let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(3).unwrap() });
    for i in 0..4 {
        cache.put(format!("k{i}"), format!("v{i}")).unwrap();
    }
    assert_eq!(cache.get("k0"), None);
    assert_eq!(cache.len(), 3);
}

#[test]
fn get_promotes_key_past_a_later_eviction() {
    let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(2).unwrap() });
    cache.put("k1".to_string(), "1".to_string()).unwrap();
    cache.put("k2".to_string(), "2".to_string()).unwrap();
    assert_eq!(cache.get("k1"), Some("1".to_string()));
    cache.put("k3".to_string(), "3".to_string()).unwrap();
    assert_eq!(cache.get("k2"), None);
    assert_eq!(cache.get("k1"), Some("1".to_string()));
}

#[test]
fn delete_returns_false_on_its_second_call() {
    let cache = Cache::new(CacheConfig { capacity: NonZeroUsize::new(2).unwrap() });
    cache.put("a".to_string(), "1".to_string()).unwrap();
    assert!(cache.delete("a"));
    assert!(!cache.delete("a"));
}

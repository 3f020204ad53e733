//! Single-threaded LRU core.
//!
//! This is the non-thread-safe algorithm underneath [`crate::Cache`],
//! kept separate so the locking strategy lives outside the algorithm
//! itself.
//!
//! # Structure
//!
//! Every live key lives in exactly one arena slot. A slot is simultaneously:
//! - a node in its hash bucket's singly-linked chain (`hnext`), and
//! - a node in the cache-wide recency list (`prev`/`next`), ordered from
//!   `head` (most recently used) to `tail` (least recently used).
//!
//! ```text
//! buckets: [ Some(3) ]──▶ slot 3 ──hnext──▶ slot 1 ──hnext──▶ None
//!
//! recency: head ──▶ slot 3 ◀──▶ slot 1 ◀──▶ slot 5 ◀──▶ tail
//! ```
//!
//! Slots are stored in a `Vec<Option<Slot>>` arena; a slot index is a
//! stable handle for the slot's lifetime. Deleting a slot sets it to
//! `None` and pushes its index onto a free list so a later `put` reuses
//! the space instead of growing the arena. This sidesteps the aliasing
//! hazards a raw-pointer doubly-linked list would carry.

use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::hash::djb2;
use core::num::NonZeroUsize;

struct Slot {
    key: String,
    value: String,
    hnext: Option<usize>,
    prev: Option<usize>,
    next: Option<usize>,
}

pub(crate) struct CacheCore {
    capacity: NonZeroUsize,
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    buckets: Vec<Option<usize>>,
    head: Option<usize>,
    tail: Option<usize>,
    size: usize,
}

impl CacheCore {
    pub(crate) fn new(config: CacheConfig) -> Self {
        CacheCore {
            capacity: config.capacity,
            slots: Vec::new(),
            free: Vec::new(),
            buckets: vec![None; config.bucket_count()],
            head: None,
            tail: None,
            size: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn bucket_of(&self, key: &str) -> usize {
        (djb2(key.as_bytes()) % self.buckets.len() as u64) as usize
    }

    fn find(&self, key: &str) -> Option<usize> {
        let mut cur = self.buckets[self.bucket_of(key)];
        while let Some(idx) = cur {
            let slot = self.slots[idx].as_ref().expect("bucket chain points at a live slot");
            if slot.key == key {
                return Some(idx);
            }
            cur = slot.hnext;
        }
        None
    }

    /// Unlink `idx` from the recency list, leaving its own prev/next intact
    /// until the caller overwrites or frees them.
    fn list_detach(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = self.slots[idx].as_ref().unwrap();
            (slot.prev, slot.next)
        };
        match prev {
            Some(p) => self.slots[p].as_mut().unwrap().next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].as_mut().unwrap().prev = prev,
            None => self.tail = prev,
        }
    }

    fn list_attach_head(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let slot = self.slots[idx].as_mut().unwrap();
            slot.prev = None;
            slot.next = old_head;
        }
        if let Some(h) = old_head {
            self.slots[h].as_mut().unwrap().prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn bucket_unlink(&mut self, key: &str, idx: usize) {
        let bucket = self.bucket_of(key);
        let mut cur = self.buckets[bucket];
        let mut prev: Option<usize> = None;
        while let Some(cur_idx) = cur {
            let hnext = self.slots[cur_idx].as_ref().unwrap().hnext;
            if cur_idx == idx {
                match prev {
                    Some(p) => self.slots[p].as_mut().unwrap().hnext = hnext,
                    None => self.buckets[bucket] = hnext,
                }
                return;
            }
            prev = Some(cur_idx);
            cur = hnext;
        }
    }

    fn free_slot(&mut self, idx: usize) {
        self.slots[idx] = None;
        self.free.push(idx);
    }

    fn alloc_slot(&mut self, slot: Slot) -> usize {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(slot);
            idx
        } else {
            self.slots.push(Some(slot));
            self.slots.len() - 1
        }
    }

    fn evict_if_needed(&mut self) {
        while self.size > self.capacity.get() {
            let Some(tail_idx) = self.tail else { break };
            let key = self.slots[tail_idx].as_ref().unwrap().key.clone();
            self.list_detach(tail_idx);
            self.bucket_unlink(&key, tail_idx);
            self.free_slot(tail_idx);
            self.size -= 1;
        }
    }

    /// See [`crate::Cache::put`].
    pub(crate) fn put(&mut self, key: String, value: String) -> Result<(), CacheError> {
        if let Some(idx) = self.find(&key) {
            self.slots[idx].as_mut().unwrap().value = value;
            self.list_detach(idx);
            self.list_attach_head(idx);
            return Ok(());
        }

        let bucket = self.bucket_of(&key);
        let slot = Slot {
            key,
            value,
            hnext: self.buckets[bucket],
            prev: None,
            next: None,
        };
        let idx = self.alloc_slot(slot);
        self.buckets[bucket] = Some(idx);
        self.list_attach_head(idx);
        self.size += 1;
        self.evict_if_needed();
        Ok(())
    }

    /// See [`crate::Cache::get`].
    pub(crate) fn get(&mut self, key: &str) -> Option<String> {
        let idx = self.find(key)?;
        self.list_detach(idx);
        self.list_attach_head(idx);
        Some(self.slots[idx].as_ref().unwrap().value.clone())
    }

    /// See [`crate::Cache::delete`].
    pub(crate) fn delete(&mut self, key: &str) -> bool {
        let Some(idx) = self.find(key) else {
            return false;
        };
        self.list_detach(idx);
        self.bucket_unlink(key, idx);
        self.free_slot(idx);
        self.size -= 1;
        true
    }

    /// Traverses the recency list head-to-tail, returning keys in MRU-first
    /// order. Used by tests to check the two linkages agree on membership.
    #[cfg(test)]
    pub(crate) fn recency_order(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut cur = self.head;
        while let Some(idx) = cur {
            let slot = self.slots[idx].as_ref().unwrap();
            out.push(slot.key.clone());
            cur = slot.next;
        }
        out
    }

    #[cfg(test)]
    pub(crate) fn bucket_members(&self) -> std::collections::HashSet<String> {
        let mut out = std::collections::HashSet::new();
        for head in &self.buckets {
            let mut cur = *head;
            while let Some(idx) = cur {
                let slot = self.slots[idx].as_ref().unwrap();
                out.insert(slot.key.clone());
                cur = slot.hnext;
            }
        }
        out
    }
}

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::graph::VertexId;

/// Mutable-priority min-queue keyed by vertex id.
///
/// Callers insert each item at most once. Tie order among equal
/// priorities is implementation-defined.
pub trait MinQueue {
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    fn insert(&mut self, item: VertexId, priority: u32);

    fn contains(&self, item: VertexId) -> bool;

    /// No-op if `item` is not queued.
    fn update_priority(&mut self, item: VertexId, priority: u32);

    /// Remove and return the lowest-priority item, or None when empty.
    fn extract_min(&mut self) -> Option<VertexId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unsorted queue: two parallel vectors, every operation a linear scan.
///
/// Extraction takes the first lowest entry in scan order and swaps the last
/// entry into the vacated slot.
#[derive(Debug, Default, Clone)]
pub struct UnsortedQueue {
    items: Vec<VertexId>,
    priorities: Vec<u32>,
}

impl UnsortedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, item: VertexId) -> Option<usize> {
        self.items.iter().position(|&i| i == item)
    }
}

impl MinQueue for UnsortedQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            priorities: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, item: VertexId, priority: u32) {
        debug_assert!(!self.contains(item), "item {item} queued twice");
        self.items.push(item);
        self.priorities.push(priority);
    }

    fn contains(&self, item: VertexId) -> bool {
        self.position(item).is_some()
    }

    fn update_priority(&mut self, item: VertexId, priority: u32) {
        if let Some(idx) = self.position(item) {
            self.priorities[idx] = priority;
        }
    }

    fn extract_min(&mut self) -> Option<VertexId> {
        let mut lowest = 0;
        for (idx, &p) in self.priorities.iter().enumerate().skip(1) {
            if p < self.priorities[lowest] {
                lowest = idx;
            }
        }
        if lowest >= self.items.len() {
            return None;
        }
        self.priorities.swap_remove(lowest);
        Some(self.items.swap_remove(lowest))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    priority: u32,
    item: VertexId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.item.cmp(&other.item))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary heap with lazy deletion.
///
/// A priority update pushes a fresh entry; stale entries are skipped on
/// extraction by comparing against `current`. Ties go to the smaller id.
#[derive(Debug, Clone, Default)]
pub struct LazyHeap {
    heap: BinaryHeap<Reverse<HeapEntry>>,
    /// Live priority per item id; None once extracted or never inserted.
    current: Vec<Option<u32>>,
    live: usize,
}

impl LazyHeap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MinQueue for LazyHeap {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            current: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    fn insert(&mut self, item: VertexId, priority: u32) {
        debug_assert!(!self.contains(item), "item {item} queued twice");
        if item >= self.current.len() {
            self.current.resize(item + 1, None);
        }
        self.current[item] = Some(priority);
        self.live += 1;
        self.heap.push(Reverse(HeapEntry { priority, item }));
    }

    fn contains(&self, item: VertexId) -> bool {
        matches!(self.current.get(item), Some(Some(_)))
    }

    fn update_priority(&mut self, item: VertexId, priority: u32) {
        match self.current.get_mut(item) {
            Some(slot) if slot.is_some() => {
                *slot = Some(priority);
                self.heap.push(Reverse(HeapEntry { priority, item }));
            }
            _ => {}
        }
    }

    fn extract_min(&mut self) -> Option<VertexId> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.current[entry.item] == Some(entry.priority) {
                self.current[entry.item] = None;
                self.live -= 1;
                return Some(entry.item);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.live
    }
}

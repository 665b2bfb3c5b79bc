// Copyright 2025 Lars Brubaker
// License: MIT
//
// The sweep's event queue.
//
// A two-phase priority queue:
//   Phase 1 (pre-init): inserts go into a key array that init() sorts once.
//   Phase 2 (post-init): inserts go directly into a min-heap.
// extract_min() takes the smaller of the sorted array's head and the heap's
// minimum, so the begin/end events created up front are sorted exactly once
// and only the intersection events discovered during the sweep pay for heap
// maintenance.

/// A binary min-heap (used after initialization).
struct Heap<T> {
    /// nodes[1..=size] are active; nodes[0] is unused.
    nodes: Vec<T>,
    /// Comparison function: returns true iff a <= b.
    leq: fn(&T, &T) -> bool,
}

impl<T: Copy> Heap<T> {
    fn new(leq: fn(&T, &T) -> bool) -> Self {
        Heap {
            nodes: Vec::new(),
            leq,
        }
    }

    #[inline]
    fn size(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    fn float_down(&mut self, mut curr: usize) {
        let size = self.size();
        let item = self.nodes[curr];
        loop {
            let mut child = curr << 1;
            if child > size {
                break;
            }
            if child < size && (self.leq)(&self.nodes[child + 1], &self.nodes[child]) {
                child += 1;
            }
            if (self.leq)(&item, &self.nodes[child]) {
                break;
            }
            self.nodes[curr] = self.nodes[child];
            curr = child;
        }
        self.nodes[curr] = item;
    }

    fn float_up(&mut self, mut curr: usize) {
        let item = self.nodes[curr];
        while curr > 1 {
            let parent = curr >> 1;
            if (self.leq)(&self.nodes[parent], &item) {
                break;
            }
            self.nodes[curr] = self.nodes[parent];
            curr = parent;
        }
        self.nodes[curr] = item;
    }

    fn insert(&mut self, item: T) {
        if self.nodes.is_empty() {
            // Slot 0 is never read.
            self.nodes.push(item);
        }
        self.nodes.push(item);
        let curr = self.size();
        self.float_up(curr);
    }

    fn extract_min(&mut self) -> Option<T> {
        let size = self.size();
        if size == 0 {
            return None;
        }
        let min = self.nodes[1];
        let last = self.nodes.pop()?;
        if size > 1 {
            self.nodes[1] = last;
            self.float_down(1);
        }
        Some(min)
    }

    #[inline]
    fn minimum(&self) -> Option<&T> {
        self.nodes.get(1)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// The combined priority queue (sort-array + heap).
pub struct PriorityQ<T> {
    heap: Heap<T>,
    /// Pre-init items; after init() sorted descending so the minimum is last.
    keys: Vec<T>,
    initialized: bool,
    leq: fn(&T, &T) -> bool,
}

impl<T: Copy> PriorityQ<T> {
    pub fn new(size: usize, leq: fn(&T, &T) -> bool) -> Self {
        PriorityQ {
            heap: Heap::new(leq),
            keys: Vec::with_capacity(size),
            initialized: false,
            leq,
        }
    }

    /// Sort the pre-init items. Must be called after all pre-init inserts and
    /// before extract_min/minimum.
    pub fn init(&mut self) {
        let leq = self.leq;
        // Descending, so the minimum pops from the end.
        self.keys.sort_by(|a, b| {
            if (leq)(a, b) {
                if (leq)(b, a) {
                    std::cmp::Ordering::Equal
                } else {
                    std::cmp::Ordering::Greater
                }
            } else {
                std::cmp::Ordering::Less
            }
        });
        self.initialized = true;
    }

    pub fn insert(&mut self, item: T) {
        if self.initialized {
            self.heap.insert(item);
        } else {
            self.keys.push(item);
        }
    }

    /// Remove and return the minimum item.
    pub fn extract_min(&mut self) -> Option<T> {
        debug_assert!(self.initialized, "extract_min before init");
        match (self.keys.last(), self.heap.minimum()) {
            (Some(sorted), Some(heaped)) => {
                if (self.leq)(heaped, sorted) {
                    self.heap.extract_min()
                } else {
                    self.keys.pop()
                }
            }
            (Some(_), None) => self.keys.pop(),
            (None, _) => self.heap.extract_min(),
        }
    }

    /// Peek at the minimum item without extracting.
    pub fn minimum(&self) -> Option<&T> {
        match (self.keys.last(), self.heap.minimum()) {
            (Some(sorted), Some(heaped)) => {
                if (self.leq)(heaped, sorted) {
                    Some(heaped)
                } else {
                    Some(sorted)
                }
            }
            (Some(sorted), None) => Some(sorted),
            (None, heaped) => heaped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len() + self.heap.size()
    }
}

//! Arena-backed doubly linked key list with stable handles.
//!
//! The recency order of the LRU policy and the per-frequency buckets of the
//! LFU policy both need the same structure: a doubly linked list supporting
//! O(1) push at either end, O(1) unlink by handle, and O(1) pop at either
//! end. Instead of raw prev/next pointers, nodes live in a slot arena (a
//! `Vec` plus a free list of vacated indices), and [`NodeId`] handles stay
//! valid until the node is unlinked.
//!
//! ```text
//!   slots: [ {b, prev:2, next:1} | {c, prev:0, next:∅} | {a, prev:∅, next:0} ]
//!                                                          ▲
//!   head = 2, tail = 1          front → a ◄──► b ◄──► c ← back
//! ```
//!
//! | Operation       | Time | Notes                              |
//! |-----------------|------|------------------------------------|
//! | `push_front`    | O(1) | reuses a free slot when available  |
//! | `push_back`     | O(1) |                                    |
//! | `unlink`        | O(1) | by handle                          |
//! | `pop_front`     | O(1) | earliest for FIFO-ordered buckets  |
//! | `pop_back`      | O(1) | LRU victim                         |
//! | `move_to_front` | O(1) | unlink + relink                    |
//! | `iter`          | O(n) | front to back                      |

/// Stable handle to a node in an [`OrderList`].
///
/// Valid from the push that produced it until the node is unlinked or popped;
/// the slot index may be reused afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Slot<K> {
    key: Option<K>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list of keys over a slot arena.
#[derive(Debug)]
pub struct OrderList<K> {
    slots: Vec<Slot<K>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> OrderList<K> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn allocate(&mut self, key: K) -> usize {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Slot {
                key: Some(key),
                prev: None,
                next: None,
            };
            idx
        } else {
            self.slots.push(Slot {
                key: Some(key),
                prev: None,
                next: None,
            });
            self.slots.len() - 1
        }
    }

    /// Links a new node at the front and returns its handle.
    pub fn push_front(&mut self, key: K) -> NodeId {
        let idx = self.allocate(key);
        self.slots[idx].next = self.head;
        match self.head {
            Some(old_head) => self.slots[old_head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        NodeId(idx)
    }

    /// Links a new node at the back and returns its handle.
    pub fn push_back(&mut self, key: K) -> NodeId {
        let idx = self.allocate(key);
        self.slots[idx].prev = self.tail;
        match self.tail {
            Some(old_tail) => self.slots[old_tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
        NodeId(idx)
    }

    fn detach(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    /// Unlinks a node by handle, returning its key.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not refer to a live node. Handles are only
    /// produced by this list and invalidated on removal, so a panic here
    /// indicates a bookkeeping bug in the caller.
    pub fn unlink(&mut self, id: NodeId) -> K {
        let idx = id.0;
        self.detach(idx);
        let key = self.slots[idx].key.take().expect("stale node handle");
        self.free.push(idx);
        self.len -= 1;
        key
    }

    /// Removes and returns the front key (earliest pushed via `push_back`).
    pub fn pop_front(&mut self) -> Option<K> {
        self.head.map(|idx| self.unlink(NodeId(idx)))
    }

    /// Removes and returns the back key.
    pub fn pop_back(&mut self) -> Option<K> {
        self.tail.map(|idx| self.unlink(NodeId(idx)))
    }

    /// Front key without removal.
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|idx| self.slots[idx].key.as_ref())
    }

    /// Back key without removal.
    pub fn back(&self) -> Option<&K> {
        self.tail.and_then(|idx| self.slots[idx].key.as_ref())
    }

    /// Relinks an existing node at the front.
    pub fn move_to_front(&mut self, id: NodeId) {
        let idx = id.0;
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.slots[idx].next = self.head;
        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(idx);
        } else {
            self.tail = Some(idx);
        }
        self.head = Some(idx);
    }

    /// Drops all nodes and recycles the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates keys from front to back.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            next: self.head,
        }
    }
}

impl<K> Default for OrderList<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over an [`OrderList`].
pub struct Iter<'a, K> {
    list: &'a OrderList<K>,
    next: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let idx = self.next?;
        let slot = &self.list.slots[idx];
        self.next = slot.next;
        slot.key.as_ref()
    }
}

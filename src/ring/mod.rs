//! Bounded circular history
//!
//! [`RingList`] is a circular doubly-linked list with an optional capacity.
//! Nodes live in a slot arena and link to each other by index; the list only
//! stores the index of its head, and the tail is always `head.prev`.
//!
//! Overflow policy is asymmetric:
//! - [`append`](RingList::append) evicts the head (oldest appended value)
//! - [`prepend`](RingList::prepend) evicts the tail

mod arena;
mod iter;

use std::fmt;

use self::arena::Arena;
pub use self::iter::Iter;
pub use crate::errors::RingError;

/// Upper bound on slots reserved up front for a bounded ring.
const PREALLOC_LIMIT: usize = 1024;

pub struct RingList<T> {
    arena: Arena<T>,
    head: Option<usize>,
    len: usize,
    capacity: Option<usize>,
}

impl<T> RingList<T> {
    /// Create a ring with an optional capacity. `Some(0)` is rejected.
    pub fn new(capacity: Option<usize>) -> Result<Self, RingError> {
        match capacity {
            Some(0) => Err(RingError::InvalidConfiguration(
                "capacity must be a positive integer".to_string(),
            )),
            // An insert briefly holds cap + 1 nodes before evicting.
            Some(cap) => Ok(Self::with_arena(
                Arena::with_capacity(cap.saturating_add(1).min(PREALLOC_LIMIT)),
                Some(cap),
            )),
            None => Ok(Self::unbounded()),
        }
    }

    pub fn unbounded() -> Self {
        Self::with_arena(Arena::new(), None)
    }

    fn with_arena(arena: Arena<T>, capacity: Option<usize>) -> Self {
        RingList {
            arena,
            head: None,
            len: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn tail(&self) -> Option<usize> {
        self.head.map(|head| self.arena[head].prev)
    }

    /// Splice a new node in front of `head`, i.e. right after the tail.
    /// Returns the new node's index.
    fn link_before_head(&mut self, value: T) -> usize {
        match self.head {
            None => {
                let idx = self.arena.next_index();
                let idx = self.arena.alloc(value, idx, idx);
                self.head = Some(idx);
                self.len = 1;
                idx
            }
            Some(head) => {
                let tail = self.arena[head].prev;
                let idx = self.arena.alloc(value, tail, head);
                self.arena[tail].next = idx;
                self.arena[head].prev = idx;
                self.len += 1;
                idx
            }
        }
    }

    fn unlink(&mut self, idx: usize) -> T {
        if self.len == 1 {
            self.head = None;
            self.len = 0;
            return self.arena.free(idx);
        }
        let (prev, next) = {
            let node = &self.arena[idx];
            (node.prev, node.next)
        };
        self.arena[prev].next = next;
        self.arena[next].prev = prev;
        if self.head == Some(idx) {
            self.head = Some(next);
        }
        self.len -= 1;
        self.arena.free(idx)
    }

    fn is_over_capacity(&self) -> bool {
        self.capacity.is_some_and(|cap| self.len > cap)
    }

    /// Insert at the tail end. On overflow the head is evicted and returned.
    pub fn append(&mut self, value: T) -> Option<T> {
        self.link_before_head(value);
        if self.is_over_capacity() {
            return self.popleft().ok();
        }
        None
    }

    /// Insert at the head end; the new value becomes the head. On overflow the
    /// tail is evicted and returned.
    pub fn prepend(&mut self, value: T) -> Option<T> {
        let idx = self.link_before_head(value);
        self.head = Some(idx);
        if self.is_over_capacity() {
            return self.pop().ok();
        }
        None
    }

    /// Remove and return the tail value.
    pub fn pop(&mut self) -> Result<T, RingError> {
        let tail = self.tail().ok_or(RingError::EmptyContainer { op: "pop" })?;
        Ok(self.unlink(tail))
    }

    /// Remove and return the head value; its successor becomes the head.
    pub fn popleft(&mut self) -> Result<T, RingError> {
        let head = self.head.ok_or(RingError::EmptyContainer { op: "popleft" })?;
        Ok(self.unlink(head))
    }

    pub fn head_value(&self) -> Result<&T, RingError> {
        let head = self.head.ok_or(RingError::EmptyContainer { op: "head" })?;
        Ok(&self.arena[head].value)
    }

    pub fn tail_value(&self) -> Result<&T, RingError> {
        let tail = self.tail().ok_or(RingError::EmptyContainer { op: "tail" })?;
        Ok(&self.arena[tail].value)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.len = 0;
    }

    /// Shift the head `steps` positions toward the tail (a right rotation of
    /// the head-to-tail sequence). Negative steps rotate the other way.
    pub fn rotate(&mut self, steps: i64) {
        let Some(mut head) = self.head else {
            return;
        };
        if self.len <= 1 {
            return;
        }
        // rem_euclid keeps the count in [0, len) for negative input.
        let steps = steps.rem_euclid(self.len as i64) as usize;
        for _ in 0..steps {
            head = self.arena[head].prev;
        }
        self.head = Some(head);
    }

    /// Return the first value, scanning from the head, that satisfies
    /// `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.head, self.len)
    }

    /// Snapshot of the contents, head to tail or tail to head.
    pub fn to_list(&self, from_tail: bool) -> Vec<T>
    where
        T: Clone,
    {
        if from_tail {
            self.iter().rev().cloned().collect()
        } else {
            self.iter().cloned().collect()
        }
    }

    /// Remove the first node equal to `value`, or every such node when
    /// `all_occurrences` is set. Returns how many were removed.
    pub fn remove_value(&mut self, value: &T, all_occurrences: bool) -> usize
    where
        T: PartialEq,
    {
        let Some(mut cur) = self.head else {
            return 0;
        };
        let mut removed = 0;
        for _ in 0..self.len {
            // Read the successor before `cur` is freed.
            let next = self.arena[cur].next;
            if self.arena[cur].value == *value {
                self.unlink(cur);
                removed += 1;
                if !all_occurrences {
                    break;
                }
            }
            if self.len == 0 {
                break;
            }
            cur = next;
        }
        removed
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        let Some(head) = self.head else {
            assert_eq!(self.len, 0, "empty ring must have len 0");
            return;
        };
        assert!(self.len > 0, "ring with a head must have len > 0");
        if let Some(cap) = self.capacity {
            assert!(self.len <= cap, "len {} exceeds capacity {}", self.len, cap);
        }
        let mut seen = std::collections::HashSet::new();
        let mut cur = head;
        for _ in 0..self.len {
            assert!(seen.insert(cur), "slot {cur} visited twice");
            let next = self.arena[cur].next;
            assert_eq!(self.arena[next].prev, cur, "broken back link at {next}");
            cur = next;
        }
        assert_eq!(cur, head, "successor walk did not return to head");
    }
}

impl<T> Default for RingList<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<'a, T> IntoIterator for &'a RingList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Values<'a, T>(&'a RingList<T>);

        impl<T: fmt::Debug> fmt::Debug for Values<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("RingList")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("values", &Values(self))
            .finish()
    }
}

//! Slot arena backing the ring.
//!
//! Nodes are addressed by their slot index. A released slot is threaded onto
//! a free list and handed out again by the next allocation, so steady-state
//! eviction never grows the backing `Vec`.

use std::ops::{Index, IndexMut};

#[cold]
#[inline(never)]
fn assert_free() -> ! {
    panic!("Attempted to access data of free slot");
}

/// One element of the ring: a value plus its two neighbour links.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) prev: usize,
    pub(crate) next: usize,
    pub(crate) value: T,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Free { next_free: Option<usize> },
    Occupied(Node<T>),
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    /// Index the next call to [`alloc`](Self::alloc) will return.
    ///
    /// Lets the caller build a node whose links point at itself.
    pub(crate) fn next_index(&self) -> usize {
        self.free_head.unwrap_or(self.slots.len())
    }

    pub(crate) fn alloc(&mut self, value: T, prev: usize, next: usize) -> usize {
        let node = Slot::Occupied(Node { prev, next, value });
        match self.free_head {
            Some(idx) => {
                let old = std::mem::replace(&mut self.slots[idx], node);
                self.free_head = match old {
                    Slot::Free { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                idx
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn is_occupied(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Slot::Occupied(_)))
    }

    /// Release the slot at `idx`, returning the value it held.
    pub(crate) fn free(&mut self, idx: usize) -> T {
        assert!(self.is_occupied(idx), "Index to free must be occupied");
        let old = std::mem::replace(
            &mut self.slots[idx],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(idx);
        match old {
            Slot::Occupied(node) => node.value,
            Slot::Free { .. } => assert_free(),
        }
    }

    /// Drop every slot, occupied or free.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    /// Number of slots ever handed out and not reclaimed by `clear`.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, idx: usize) -> &Self::Output {
        match &self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_free(),
        }
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        match &mut self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_free(),
        }
    }
}

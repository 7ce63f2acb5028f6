use std::iter::FusedIterator;

use super::arena::Arena;

/// Borrowing iterator over a [`RingList`](super::RingList), head to tail.
///
/// The number of items is fixed to the ring length when the iterator is
/// created. Iterating from the back walks predecessor links from the tail.
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, head: Option<usize>, len: usize) -> Self {
        match head {
            Some(head) => Iter {
                arena,
                front: head,
                back: arena[head].prev,
                remaining: len,
            },
            None => Iter {
                arena,
                front: 0,
                back: 0,
                remaining: 0,
            },
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.arena[self.front];
        self.remaining -= 1;
        self.front = node.next;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.arena[self.back];
        self.remaining -= 1;
        self.back = node.prev;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

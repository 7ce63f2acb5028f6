//! Unit tests for the ring module
//!
//! Tests cover:
//! - Capacity-triggered eviction (append vs prepend)
//! - Rotation, including negative steps
//! - Search and removal by value
//! - Traversal in both directions

use tickring::errors::RingError;
use tickring::ring::RingList;

fn letters(values: &[&'static str]) -> RingList<&'static str> {
    let mut ring = RingList::unbounded();
    for v in values {
        ring.append(*v);
    }
    ring
}

// ============================================================================
// Construction
// ============================================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RingList::<u8>::new(Some(0)),
            Err(RingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_is_unbounded_and_empty() {
        let ring: RingList<u8> = RingList::default();
        assert_eq!(ring.capacity(), None);
        assert_eq!(ring.len(), 0);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_unbounded_never_evicts() {
        let mut ring = RingList::new(None).unwrap();
        for i in 0..500 {
            assert_eq!(ring.append(i), None);
        }
        assert_eq!(ring.len(), 500);
    }
}

// ============================================================================
// Eviction
// ============================================================================

mod eviction_tests {
    use super::*;

    #[test]
    fn test_append_overflow_drops_oldest() {
        let mut ring = RingList::new(Some(3)).unwrap();
        for v in 1..=4 {
            ring.append(v);
        }
        assert_eq!(ring.to_list(false), vec![2, 3, 4]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_prepend_overflow_drops_tail() {
        let mut ring = RingList::new(Some(2)).unwrap();
        for v in 1..=3 {
            ring.prepend(v);
        }
        assert_eq!(ring.to_list(false), vec![3, 2]);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_mixed_insertions_respect_direction() {
        let mut ring = RingList::new(Some(3)).unwrap();
        ring.append("b");
        ring.append("c");
        ring.prepend("a");
        // full: [a, b, c]; append evicts the head
        assert_eq!(ring.append("d"), Some("a"));
        // [b, c, d]; prepend evicts the tail
        assert_eq!(ring.prepend("z"), Some("d"));
        assert_eq!(ring.to_list(false), vec!["z", "b", "c"]);
    }
}

// ============================================================================
// Removal & search
// ============================================================================

mod removal_tests {
    use super::*;

    #[test]
    fn test_pop_popleft_on_empty() {
        let mut ring: RingList<i32> = RingList::unbounded();
        assert!(matches!(ring.pop(), Err(RingError::EmptyContainer { .. })));
        assert!(matches!(ring.popleft(), Err(RingError::EmptyContainer { .. })));
    }

    #[test]
    fn test_head_and_tail_values() {
        let ring = letters(&["a", "b", "c"]);
        assert_eq!(ring.head_value(), Ok(&"a"));
        assert_eq!(ring.tail_value(), Ok(&"c"));
    }

    #[test]
    fn test_remove_two_occurrences() {
        let mut ring = letters(&["x", "a", "x", "b"]);
        assert_eq!(ring.remove_value(&"x", true), 2);
        assert_eq!(ring.find(|v| *v == "x"), None);
        assert_eq!(ring.to_list(false), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_missing_value() {
        let mut ring = letters(&["a", "b"]);
        assert_eq!(ring.remove_value(&"q", true), 0);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_remove_tail_updates_tail() {
        let mut ring = letters(&["a", "b", "c"]);
        assert_eq!(ring.remove_value(&"c", false), 1);
        assert_eq!(ring.tail_value(), Ok(&"b"));
    }

    #[test]
    fn test_find_on_empty() {
        let ring: RingList<i32> = RingList::unbounded();
        assert_eq!(ring.find(|_| true), None);
        assert!(ring.to_list(false).is_empty());
    }
}

// ============================================================================
// Rotation & traversal
// ============================================================================

mod rotation_tests {
    use super::*;

    #[test]
    fn test_rotate_one_each_way() {
        let mut ring = letters(&["A", "B", "C"]);
        ring.rotate(1);
        assert_eq!(ring.to_list(false), vec!["C", "A", "B"]);

        let mut ring = letters(&["A", "B", "C"]);
        ring.rotate(-1);
        assert_eq!(ring.to_list(false), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rotate_by_len_is_identity() {
        let mut ring = letters(&["A", "B", "C", "D", "E"]);
        ring.rotate(5);
        assert_eq!(ring.to_list(false), vec!["A", "B", "C", "D", "E"]);
        ring.rotate(i64::MIN);
        // i64::MIN mod 5 == 2
        assert_eq!(ring.to_list(false), vec!["D", "E", "A", "B", "C"]);
    }

    #[test]
    fn test_rotate_then_insert_uses_new_head() {
        let mut ring = letters(&["A", "B", "C"]);
        ring.rotate(1);
        ring.append("D");
        assert_eq!(ring.to_list(false), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_reverse_traversal() {
        let mut ring = letters(&["A", "B", "C"]);
        ring.rotate(2);
        assert_eq!(ring.to_list(true), vec!["A", "C", "B"]);
        let rev: Vec<_> = ring.iter().rev().copied().collect();
        assert_eq!(rev, ring.to_list(true));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let ring = letters(&["A", "B"]);
        let first: Vec<_> = ring.iter().collect();
        let second: Vec<_> = (&ring).into_iter().collect();
        assert_eq!(first, second);
    }
}

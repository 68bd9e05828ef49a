//! End-to-end properties of the list: ordering, handle stability and
//! invalidation, block lifecycle, and reordering.

use slotlist::{InvalidHandle, SlotList};

fn contents(list: &SlotList<u64>) -> Vec<u64> {
    list.iter().copied().collect()
}

#[test]
fn push_back_sequences_keep_insertion_order() {
    for n in 0..16u64 {
        let mut list = SlotList::new();
        for i in 0..n {
            list.push_back(i);
        }
        assert_eq!(list.len() as u64, n);
        assert_eq!(contents(&list), (0..n).collect::<Vec<_>>());
    }
}

#[test]
fn push_front_sequences_reverse_insertion_order() {
    let mut list = SlotList::new();
    for i in 0..8u64 {
        list.push_front(i);
    }
    assert_eq!(contents(&list), (0..8u64).rev().collect::<Vec<_>>());
}

#[test]
fn forward_traversal_via_next_visits_each_exactly_once() {
    let mut list = SlotList::new();
    for i in 10..15u64 {
        list.push_back(i);
    }

    let mut seen = Vec::new();
    let mut cursor = list.front_handle();
    while let Some(handle) = cursor {
        seen.push(*list.get(handle).unwrap());
        cursor = list.next(handle);
    }
    assert_eq!(seen, vec![10, 11, 12, 13, 14]);

    let mut reversed = Vec::new();
    let mut cursor = list.back_handle();
    while let Some(handle) = cursor {
        reversed.push(*list.get(handle).unwrap());
        cursor = list.prev(handle);
    }
    assert_eq!(reversed, vec![14, 13, 12, 11, 10]);
}

#[test]
fn remove_shrinks_by_one_and_kills_only_that_handle() {
    let mut list = SlotList::new();
    let handles: Vec<_> = (0..6u64).map(|i| list.push_back(i)).collect();

    let victim = handles[3];
    assert_eq!(list.remove(victim), Some(3));
    assert_eq!(list.len(), 5);

    // Re-removal must fail.
    assert_eq!(list.remove(victim), None);
    assert_eq!(list.len(), 5);

    // Every other handle still resolves to its value.
    for (i, &h) in handles.iter().enumerate() {
        if i == 3 {
            assert!(!list.contains(h));
        } else {
            assert_eq!(list.get(h), Some(&(i as u64)));
        }
    }
}

#[test]
fn emptied_list_reinitializes_cleanly() {
    let mut list = SlotList::new();
    let old: Vec<_> = (0..4u64).map(|i| list.push_back(i)).collect();

    while list.pop_front().is_some() {}
    assert_eq!(list.len(), 0);
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);

    // The lazily re-created block works and rejects pre-reset handles.
    let fresh = list.push_back(99);
    assert_eq!(contents(&list), vec![99]);
    assert_eq!(list.get(fresh), Some(&99));
    for h in old {
        assert!(!list.contains(h));
        assert_eq!(list.remove(h), None);
    }
}

#[test]
fn clear_then_reuse() {
    let mut list = SlotList::new();
    for i in 0..4u64 {
        list.push_back(i);
    }
    list.clear();
    assert!(list.is_empty());

    list.push_back(7);
    list.push_front(6);
    assert_eq!(contents(&list), vec![6, 7]);
}

#[test]
fn move_to_back_makes_handle_the_back() {
    let mut list = SlotList::new();
    let handles: Vec<_> = (0..5u64).map(|i| list.push_back(i)).collect();

    for &h in &handles {
        list.move_to_back(h).unwrap();
        assert_eq!(list.back_handle(), Some(h));
        assert_eq!(list.len(), 5);
    }
    // Moving each in order restores the original sequence.
    assert_eq!(contents(&list), vec![0, 1, 2, 3, 4]);
}

#[test]
fn move_to_back_on_tail_changes_nothing() {
    let mut list = SlotList::new();
    for i in 0..3u64 {
        list.push_back(i);
    }
    let tail = list.back_handle().unwrap();

    list.move_to_back(tail).unwrap();
    assert_eq!(contents(&list), vec![0, 1, 2]);
    assert_eq!(list.back_handle(), Some(tail));
}

#[test]
fn move_before_places_immediately_before_anchor() {
    let mut list = SlotList::new();
    let handles: Vec<_> = (0..5u64).map(|i| list.push_back(i)).collect();

    list.move_before(handles[4], Some(handles[1])).unwrap();
    assert_eq!(contents(&list), vec![0, 4, 1, 2, 3]);
    assert_eq!(list.next(handles[4]), Some(handles[1]));
    assert_eq!(list.prev(handles[1]), Some(handles[4]));
}

#[test]
fn move_before_none_appends() {
    let mut list = SlotList::new();
    let handles: Vec<_> = (0..3u64).map(|i| list.push_back(i)).collect();

    list.move_before(handles[0], None).unwrap();
    assert_eq!(contents(&list), vec![1, 2, 0]);
    assert_eq!(list.back_handle(), Some(handles[0]));
}

#[test]
fn find_then_remove_round_trip() {
    let mut list = SlotList::new();
    for i in [1u64, 2, 3] {
        list.push_back(i);
    }

    let found = list.find(&2).unwrap();
    assert_eq!(list.remove(found), Some(2));
    assert_eq!(contents(&list), vec![1, 3]);
}

#[test]
fn structurally_identical_container_rejects_foreign_handles() {
    let mut a = SlotList::new();
    let mut b = SlotList::new();
    for i in 0..3u64 {
        a.push_back(i);
        b.push_back(i);
    }

    // Same slots, same generations, different storage blocks.
    for h in a.handles().collect::<Vec<_>>() {
        assert_eq!(b.remove(h), None);
        assert_eq!(b.move_to_front(h), Err(InvalidHandle));
    }
    assert_eq!(b.len(), 3);
}

#[test]
fn interleaved_churn_keeps_chain_consistent() {
    let mut list = SlotList::new();
    let mut handles = Vec::new();

    for round in 0..8u64 {
        for i in 0..4 {
            handles.push(list.push_back(round * 10 + i));
        }
        // Remove every other surviving handle.
        let mut keep = Vec::new();
        for (i, h) in handles.drain(..).enumerate() {
            if i % 2 == 0 {
                assert!(list.remove(h).is_some());
            } else {
                keep.push(h);
            }
        }
        handles = keep;

        // Forward and backward traversals agree at every step.
        let forward = contents(&list);
        let mut backward: Vec<_> = list.iter().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
    }
}

#[test]
fn lru_access_pattern() {
    // The motivating workload: touch an entry, it moves to the back;
    // evict from the front.
    let mut lru = SlotList::new();
    let a = lru.push_back("a");
    let b = lru.push_back("b");
    let c = lru.push_back("c");

    lru.move_to_back(a).unwrap(); // touch a
    lru.move_to_back(b).unwrap(); // touch b

    assert_eq!(lru.pop_front(), Some("c")); // least recently used
    assert_eq!(lru.pop_front(), Some("a"));
    assert_eq!(lru.pop_front(), Some("b"));
    assert!(lru.is_empty());
    assert!(!lru.contains(c));
}

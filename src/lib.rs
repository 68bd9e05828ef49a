//! Doubly-linked list with stable, generation-checked handles.
//!
//! The classic "stable iterator" container used in caches, scheduling
//! queues, and LRU structures: every insert returns an opaque [`Handle`]
//! that stays valid until that exact element is removed, and removal and
//! reordering are O(1) given the handle, with no search.
//!
//! # Design
//!
//! Pointer-linked lists buy O(1) splicing with aliased ownership. This
//! crate keeps the splicing and drops the aliasing by storing nodes in a
//! slot arena:
//!
//! ```text
//! SlotList<T>  - owns at most one storage block, created lazily
//! Block<T>     - slot arena + head/tail/len, one per non-empty list
//! Handle       - { block id, slot, generation }: plain Copy data
//! ```
//!
//! Links between nodes are slot indices, not pointers. Each slot carries a
//! generation that bumps when the slot is vacated, and each block carries
//! a process-unique incarnation id. A handle must match all three to touch
//! anything, so the usual linked-list footguns - stale handle, handle from
//! another list, handle outliving a cleared list - are O(1) checked
//! failures instead of corruption.
//!
//! # Quick start
//!
//! ```
//! use slotlist::SlotList;
//!
//! let mut recent: SlotList<&str> = SlotList::new();
//!
//! let a = recent.push_back("alpha");
//! let b = recent.push_back("beta");
//! let c = recent.push_back("gamma");
//!
//! // LRU touch: O(1), no other handle is disturbed.
//! recent.move_to_back(a).unwrap();
//! assert_eq!(recent.iter().copied().collect::<Vec<_>>(), ["beta", "gamma", "alpha"]);
//!
//! // O(1) removal from anywhere.
//! assert_eq!(recent.remove(b), Some("beta"));
//!
//! // Handles from removed elements fail instead of aliasing.
//! assert_eq!(recent.remove(b), None);
//! assert_eq!(recent.get(c), Some(&"gamma"));
//! ```
//!
//! # Lifecycle invariant
//!
//! The storage block exists exactly while the list is non-empty: it is
//! allocated by the first insert and dropped when the last element is
//! removed (by [`remove`](SlotList::remove), [`pop_front`](SlotList::pop_front),
//! [`pop_back`](SlotList::pop_back), or [`clear`](SlotList::clear)). A
//! list that empties and refills gets a fresh block incarnation, so
//! handles never leak across lifetimes:
//!
//! ```
//! use slotlist::SlotList;
//!
//! let mut list = SlotList::new();
//! let old = list.push_back(1);
//! list.clear();
//!
//! let _new = list.push_back(1);
//! assert_eq!(list.get(old), None); // old incarnation, rejected
//! ```
//!
//! # Errors
//!
//! Caller mistakes are reported through return values: `Option` for
//! removal and the accessors, [`InvalidHandle`] for the reordering
//! operations, and [`InvalidAnchor`] (which hands the value back) for
//! positional inserts. Panics are reserved for internal chain corruption,
//! which would be a bug in this crate.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `push_front` / `push_back` / `insert_before` / `insert_after` | O(1) amortized |
//! | `remove` / `pop_front` / `pop_back` | O(1) |
//! | `move_to_front` / `move_to_back` / `move_before` | O(1) |
//! | `get` / `get_mut` / `next` / `prev` / endpoint accessors | O(1) |
//! | `find` / `erase` / `clear` | O(n) |
//!
//! This is a single-threaded container: no internal synchronization, no
//! operation suspends or performs I/O.

#![warn(missing_docs)]

mod block;
mod error;
mod handle;
mod list;

pub use error::{InvalidAnchor, InvalidHandle};
pub use handle::Handle;
pub use list::{Handles, IntoIter, Iter, IterMut, SlotList};

//! The storage block: a slot arena for nodes plus chain bookkeeping.
//!
//! One block exists per non-empty list. It owns every node, hands out
//! generation-checked handles, and performs all O(1) splicing. The
//! container ([`SlotList`](crate::SlotList)) creates a block on first
//! insertion and drops it when the last node is detached.

use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::InvalidHandle;
use crate::handle::{Handle, SLOT_NONE};

/// Source of block incarnation ids.
///
/// The only process-wide state in the crate: a monotonic counter, relaxed
/// ordering, starting at 1 so an all-zero handle never validates. Ids are
/// never reused, which is what makes a handle from one block incarnation
/// fail against every other, including a later block of the same list.
static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(1);

/// A node in the chain. Links are slot indices, `SLOT_NONE` at endpoints.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: u32,
    pub(crate) next: u32,
}

/// A slot is either vacant (threaded on the free list) or holds a node.
#[derive(Debug)]
enum Slot<T> {
    Vacant { next_free: u32 },
    Occupied(Node<T>),
}

/// One arena slot with its reuse generation.
///
/// The generation bumps each time the slot is vacated, so a handle minted
/// for a previous occupant no longer matches after the slot is recycled.
#[derive(Debug)]
struct Entry<T> {
    generation: u32,
    state: Slot<T>,
}

/// The shared aggregate state of one non-empty list: the node arena and
/// the `head`/`tail`/`len` bookkeeping.
#[derive(Debug)]
pub(crate) struct Block<T> {
    id: u64,
    entries: Vec<Entry<T>>,
    free_head: u32,
    pub(crate) head: u32,
    pub(crate) tail: u32,
    pub(crate) len: usize,
}

impl<T> Block<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed),
            entries: Vec::with_capacity(capacity),
            free_head: SLOT_NONE,
            head: SLOT_NONE,
            tail: SLOT_NONE,
            len: 0,
        }
    }

    /// Mints the handle for an occupied slot.
    pub(crate) fn handle_for(&self, slot: u32) -> Handle {
        Handle {
            owner: self.id,
            slot,
            generation: self.entries[slot as usize].generation,
        }
    }

    /// Resolves a handle to its slot index.
    ///
    /// Fails if the handle was minted by another block, the slot is out of
    /// range or vacant, or the generation no longer matches (stale handle).
    pub(crate) fn resolve(&self, handle: Handle) -> Option<u32> {
        if handle.owner != self.id {
            return None;
        }
        let entry = self.entries.get(handle.slot as usize)?;
        match entry.state {
            Slot::Occupied(_) if entry.generation == handle.generation => Some(handle.slot),
            _ => None,
        }
    }

    /// Returns the node at a slot known to be linked into the chain.
    ///
    /// A vacant slot here means the chain itself is corrupt, which is a
    /// bug in this module, not caller misuse.
    pub(crate) fn node(&self, slot: u32) -> &Node<T> {
        match &self.entries[slot as usize].state {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot reachable from the chain"),
        }
    }

    pub(crate) fn node_mut(&mut self, slot: u32) -> &mut Node<T> {
        match &mut self.entries[slot as usize].state {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot reachable from the chain"),
        }
    }

    // ========================================================================
    // Slot allocation
    // ========================================================================

    /// Allocates a slot for a new unlinked node, reusing the free list
    /// before growing the arena.
    pub(crate) fn alloc(&mut self, value: T) -> u32 {
        let node = Node {
            value,
            prev: SLOT_NONE,
            next: SLOT_NONE,
        };

        if self.free_head != SLOT_NONE {
            let slot = self.free_head;
            let entry = &mut self.entries[slot as usize];
            match entry.state {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("occupied slot on the free list"),
            }
            entry.state = Slot::Occupied(node);
            slot
        } else {
            let slot = self.entries.len();
            assert!(slot < SLOT_NONE as usize, "slot arena exhausted");
            self.entries.push(Entry {
                generation: 0,
                state: Slot::Occupied(node),
            });
            slot as u32
        }
    }

    /// Vacates a slot, bumping its generation and returning the value.
    ///
    /// The node must already be unlinked from the chain.
    fn release(&mut self, slot: u32) -> T {
        let entry = &mut self.entries[slot as usize];
        let state = mem::replace(
            &mut entry.state,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        entry.generation = entry.generation.wrapping_add(1);
        self.free_head = slot;
        match state {
            Slot::Occupied(node) => node.value,
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    // ========================================================================
    // Splicing
    // ========================================================================

    /// Links an unlinked node at the back of the chain.
    pub(crate) fn link_back(&mut self, slot: u32) {
        let tail = self.tail;
        {
            let node = self.node_mut(slot);
            node.prev = tail;
            node.next = SLOT_NONE;
        }

        if tail != SLOT_NONE {
            self.node_mut(tail).next = slot;
        } else {
            self.head = slot;
        }

        self.tail = slot;
        self.len += 1;
    }

    /// Links an unlinked node at the front of the chain.
    pub(crate) fn link_front(&mut self, slot: u32) {
        let head = self.head;
        {
            let node = self.node_mut(slot);
            node.next = head;
            node.prev = SLOT_NONE;
        }

        if head != SLOT_NONE {
            self.node_mut(head).prev = slot;
        } else {
            self.tail = slot;
        }

        self.head = slot;
        self.len += 1;
    }

    /// Links an unlinked node immediately before `before`.
    pub(crate) fn link_before(&mut self, before: u32, slot: u32) {
        let prev = self.node(before).prev;
        {
            let node = self.node_mut(slot);
            node.next = before;
            node.prev = prev;
        }

        self.node_mut(before).prev = slot;

        if prev != SLOT_NONE {
            self.node_mut(prev).next = slot;
        } else {
            self.head = slot;
        }

        self.len += 1;
    }

    /// Links an unlinked node immediately after `after`.
    pub(crate) fn link_after(&mut self, after: u32, slot: u32) {
        let next = self.node(after).next;
        {
            let node = self.node_mut(slot);
            node.prev = after;
            node.next = next;
        }

        self.node_mut(after).next = slot;

        if next != SLOT_NONE {
            self.node_mut(next).prev = slot;
        } else {
            self.tail = slot;
        }

        self.len += 1;
    }

    /// Splices a node out of the chain without vacating its slot.
    fn unlink(&mut self, slot: u32) {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };

        if prev != SLOT_NONE {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next != SLOT_NONE {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        let node = self.node_mut(slot);
        node.prev = SLOT_NONE;
        node.next = SLOT_NONE;

        self.len -= 1;
    }

    // ========================================================================
    // Detach and reorder
    // ========================================================================

    /// Unlinks the handle's node and vacates its slot, returning the value.
    ///
    /// Fails without mutating anything if the handle does not resolve.
    pub(crate) fn detach(&mut self, handle: Handle) -> Option<T> {
        let slot = self.resolve(handle)?;
        self.unlink(slot);
        Some(self.release(slot))
    }

    /// Moves the handle's node to the back of the chain. No-op if it is
    /// already the tail.
    pub(crate) fn move_to_back(&mut self, handle: Handle) -> Result<(), InvalidHandle> {
        let slot = self.resolve(handle).ok_or(InvalidHandle)?;
        if self.tail == slot {
            return Ok(());
        }

        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };

        if prev != SLOT_NONE {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }
        // next is never the sentinel here: slot is not the tail.
        self.node_mut(next).prev = prev;

        let tail = self.tail;
        self.node_mut(tail).next = slot;
        let node = self.node_mut(slot);
        node.prev = tail;
        node.next = SLOT_NONE;
        self.tail = slot;

        Ok(())
    }

    /// Moves the handle's node to the front of the chain. No-op if it is
    /// already the head.
    pub(crate) fn move_to_front(&mut self, handle: Handle) -> Result<(), InvalidHandle> {
        let slot = self.resolve(handle).ok_or(InvalidHandle)?;
        if self.head == slot {
            return Ok(());
        }

        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };

        // prev is never the sentinel here: slot is not the head.
        self.node_mut(prev).next = next;
        if next != SLOT_NONE {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        let head = self.head;
        self.node_mut(head).prev = slot;
        let node = self.node_mut(slot);
        node.next = head;
        node.prev = SLOT_NONE;
        self.head = slot;

        Ok(())
    }

    /// Moves the handle's node immediately before `before`, or to the back
    /// of the chain when `before` is `None`.
    ///
    /// Both handles are resolved before anything is touched, so a failure
    /// leaves the chain unchanged.
    pub(crate) fn move_before(
        &mut self,
        handle: Handle,
        before: Option<Handle>,
    ) -> Result<(), InvalidHandle> {
        let slot = self.resolve(handle).ok_or(InvalidHandle)?;
        let anchor = match before {
            Some(before) => {
                let anchor = self.resolve(before).ok_or(InvalidHandle)?;
                if anchor == slot {
                    return Err(InvalidHandle);
                }
                Some(anchor)
            }
            None => None,
        };

        self.unlink(slot);
        match anchor {
            Some(anchor) => self.link_before(anchor, slot),
            None => self.link_back(slot),
        }
        Ok(())
    }
}

//! Positional doubly-linked sequence backed by an arena of nodes.
//!
//! Nodes live in a `Vec` of slots and link to each other by slot index, so a
//! removed node can never leave a dangling neighbour behind. Callers hold
//! [`NodeHandle`]s, which pair the slot index with a generation counter: a
//! handle to a removed node stays detectably stale even after its slot is
//! reused.
//!
//! Positions are **1-based** and always resolved by walking from the head, so
//! positional access is O(position).
//!
//! # Examples
//! ```
//! use plasmid::sequence::OrderedSequence;
//! let mut seq = OrderedSequence::new();
//! seq.append("b").unwrap();
//! seq.insert_at("a", 1).unwrap();
//! seq.insert_at("z", 99).unwrap(); // clamps to the tail
//! assert_eq!(seq.iter().copied().collect::<Vec<_>>(), ["a", "b", "z"]);
//! ```
use crate::error::{PlasmidError, Result};
use log::debug;

/// Stable reference to a node inside one [`OrderedSequence`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Node<T> {
    payload: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Generic ordered container with 1-based positional insert and removal.
#[derive(Debug)]
pub struct OrderedSequence<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for OrderedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSequence<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), head: None, tail: None, len: 0 }
    }

    /// Number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when head and tail are both absent.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Handle of the first node, if any.
    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(|i| self.handle(i))
    }

    /// Handle of the last node, if any.
    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(|i| self.handle(i))
    }

    /// Add `payload` after the current tail.
    pub fn append(&mut self, payload: T) -> Result<NodeHandle> {
        let prev = self.tail;
        let index = self.alloc(Node { payload, prev, next: None })?;
        match prev {
            Some(p) => self.node_mut(p).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        debug!("appended node {} (len={})", index, self.len);
        Ok(self.handle(index))
    }

    /// Insert `payload` so that it ends up at `position`.
    ///
    /// `position <= 1` (or an empty sequence) inserts at the head. Otherwise the
    /// walk stops at the node at `position - 1`, or at the tail if the sequence
    /// is shorter, and the payload is linked right after it. Oversized positions
    /// therefore behave as an append rather than failing.
    pub fn insert_at(&mut self, payload: T, position: usize) -> Result<NodeHandle> {
        let Some(head) = self.head.filter(|_| position > 1) else {
            return self.push_front(payload);
        };

        let mut cur = head;
        let mut idx = 1;
        while idx < position - 1 {
            match self.node(cur).next {
                Some(n) => { cur = n; idx += 1; }
                None => break,
            }
        }

        let next = self.node(cur).next;
        let index = self.alloc(Node { payload, prev: Some(cur), next })?;
        match next {
            Some(n) => self.node_mut(n).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.node_mut(cur).next = Some(index);
        self.len += 1;
        debug!("inserted node {} after {} (requested position {}, len={})", index, cur, position, self.len);
        Ok(self.handle(index))
    }

    fn push_front(&mut self, payload: T) -> Result<NodeHandle> {
        let next = self.head;
        let index = self.alloc(Node { payload, prev: None, next })?;
        match next {
            Some(n) => self.node_mut(n).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
        debug!("inserted node {} at head (len={})", index, self.len);
        Ok(self.handle(index))
    }

    /// Unlink the node behind `handle` and hand its payload back.
    ///
    /// Neighbours are re-linked and head/tail move when an endpoint is removed.
    /// A stale handle fails with [`PlasmidError::InvalidHandle`] and changes nothing.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T> {
        if !self.is_live(handle) {
            return Err(PlasmidError::InvalidHandle);
        }
        let slot = &mut self.slots[handle.index];
        let node = slot.node.take().ok_or(PlasmidError::InvalidHandle)?;
        slot.generation = slot.generation.wrapping_add(1);

        match node.prev {
            Some(p) => self.node_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.node_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }
        // Capacity for this push was reserved when the slot was created.
        self.free.push(handle.index);
        self.len -= 1;
        debug!("removed node {} (len={})", handle.index, self.len);
        Ok(node.payload)
    }

    /// Handle of the node at 1-based `position`, walking from the head.
    pub fn walk_to(&self, position: usize) -> Option<NodeHandle> {
        if position == 0 {
            return None;
        }
        let mut cur = self.head?;
        for _ in 1..position {
            cur = self.node(cur).next?;
        }
        Some(self.handle(cur))
    }

    /// Unlink every node and return the payloads in traversal order.
    ///
    /// The sequence is empty afterwards; what happens to the payloads is up to
    /// the caller.
    pub fn clear(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(i) = cur {
            let node = self.slots[i].node.take();
            cur = node.as_ref().and_then(|n| n.next);
            out.extend(node.map(|n| n.payload));
        }
        // Bump every generation so handles from before the clear stay stale.
        self.free.clear();
        for (i, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(i);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
        out
    }

    /// Borrow the payload behind `handle`.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        if !self.is_live(handle) { return None; }
        self.slots[handle.index].node.as_ref().map(|n| &n.payload)
    }

    /// Mutably borrow the payload behind `handle`.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        if !self.is_live(handle) { return None; }
        self.slots[handle.index].node.as_mut().map(|n| &mut n.payload)
    }

    /// Neighbour towards the tail.
    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        if !self.is_live(handle) { return None; }
        self.node(handle.index).next.map(|i| self.handle(i))
    }

    /// Neighbour towards the head.
    pub fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        if !self.is_live(handle) { return None; }
        self.node(handle.index).prev.map(|i| self.handle(i))
    }

    /// Payloads from head to tail. Reverse with `.rev()`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { seq: self, front: self.head, back: self.tail, remaining: self.len }
    }

    /// Node handles from head to tail.
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.head(), move |h| self.next(*h))
    }

    fn alloc(&mut self, node: Node<T>) -> Result<usize> {
        if let Some(index) = self.free.pop() {
            self.slots[index].node = Some(node);
            return Ok(index);
        }
        self.slots.try_reserve(1).map_err(|_| PlasmidError::Allocation)?;
        // Keep room for every slot on the free list so `remove` never allocates.
        let want = self.slots.len() + 1 - self.free.len();
        self.free.try_reserve(want).map_err(|_| PlasmidError::Allocation)?;
        self.slots.push(Slot { generation: 0, node: Some(node) });
        Ok(self.slots.len() - 1)
    }

    fn is_live(&self, handle: NodeHandle) -> bool {
        self.slots
            .get(handle.index)
            .is_some_and(|s| s.generation == handle.generation && s.node.is_some())
    }

    fn handle(&self, index: usize) -> NodeHandle {
        NodeHandle { index, generation: self.slots[index].generation }
    }

    // Linked indices always point at occupied slots.
    fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index].node {
            Some(n) => n,
            None => unreachable!("link to vacant slot {index}"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index].node {
            Some(n) => n,
            None => unreachable!("link to vacant slot {index}"),
        }
    }
}

/// Double-ended iterator over payloads, see [`OrderedSequence::iter`].
pub struct Iter<'a, T> {
    seq: &'a OrderedSequence<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 { return None; }
        let node = self.seq.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 { return None; }
        let node = self.seq.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.payload)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a OrderedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk both directions and check every structural invariant.
    fn assert_well_linked<T>(seq: &OrderedSequence<T>) {
        assert_eq!(seq.head.is_none(), seq.tail.is_none(), "head/tail emptiness differs");
        if let Some(h) = seq.head { assert!(seq.node(h).prev.is_none(), "head has a prev link"); }
        if let Some(t) = seq.tail { assert!(seq.node(t).next.is_none(), "tail has a next link"); }

        let forward: Vec<usize> = std::iter::successors(seq.head, |&i| seq.node(i).next).collect();
        let mut backward: Vec<usize> = std::iter::successors(seq.tail, |&i| seq.node(i).prev).collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), seq.len());
        for pair in forward.windows(2) {
            assert_eq!(seq.node(pair[0]).next, Some(pair[1]));
            assert_eq!(seq.node(pair[1]).prev, Some(pair[0]));
        }
        for (p, &i) in forward.iter().enumerate() {
            assert_eq!(seq.walk_to(p + 1).map(|h| h.index), Some(i));
        }
    }

    fn contents(seq: &OrderedSequence<u32>) -> Vec<u32> { seq.iter().copied().collect() }

    #[test]
    fn insert_at_head_and_clamped_tail() {
        let mut s = OrderedSequence::new();
        s.insert_at(2, 5).unwrap(); // empty -> head
        s.insert_at(1, 0).unwrap();
        s.insert_at(3, 1000).unwrap();
        s.insert_at(9, 1).unwrap();
        assert_eq!(contents(&s), [9, 1, 2, 3]);
        assert_well_linked(&s);
    }

    #[test]
    fn insert_in_middle_lands_at_requested_position() {
        let mut s = OrderedSequence::new();
        for v in [1, 2, 4] { s.append(v).unwrap(); }
        s.insert_at(3, 3).unwrap();
        assert_eq!(contents(&s), [1, 2, 3, 4]);
        s.insert_at(5, 5).unwrap(); // len + 1
        assert_eq!(contents(&s), [1, 2, 3, 4, 5]);
        assert_eq!(s.walk_to(3).and_then(|h| s.get(h)), Some(&3));
        assert_well_linked(&s);
    }

    #[test]
    fn remove_endpoints_and_middle() {
        let mut s = OrderedSequence::new();
        let hs: Vec<_> = (1..=5).map(|v| s.append(v).unwrap()).collect();
        assert_eq!(s.remove(hs[0]).unwrap(), 1);
        assert_eq!(s.remove(hs[4]).unwrap(), 5);
        assert_eq!(s.remove(hs[2]).unwrap(), 3);
        assert_eq!(contents(&s), [2, 4]);
        assert_well_linked(&s);
        assert_eq!(s.prev(hs[3]), Some(hs[1]));
        assert_eq!(s.next(hs[1]), Some(hs[3]));
    }

    #[test]
    fn removing_last_node_restores_empty_state() {
        let mut s = OrderedSequence::new();
        let h = s.append(7).unwrap();
        s.remove(h).unwrap();
        assert!(s.is_empty());
        assert!(s.head().is_none() && s.tail().is_none());
        assert!(s.walk_to(1).is_none());
        assert_well_linked(&s);
    }

    #[test]
    fn stale_handle_is_rejected_after_slot_reuse() {
        let mut s = OrderedSequence::new();
        let old = s.append(1).unwrap();
        s.remove(old).unwrap();
        let fresh = s.append(2).unwrap();
        assert_eq!(s.remove(old), Err(PlasmidError::InvalidHandle));
        assert!(s.get(old).is_none());
        assert_eq!(s.get(fresh), Some(&2));
        assert_eq!(contents(&s), [2]);
    }

    #[test]
    fn walk_to_out_of_range() {
        let mut s = OrderedSequence::new();
        assert!(s.walk_to(1).is_none());
        s.append(1).unwrap();
        assert!(s.walk_to(0).is_none());
        assert!(s.walk_to(2).is_none());
    }

    #[test]
    fn clear_returns_payloads_in_order() {
        let mut s = OrderedSequence::new();
        for v in [3, 1, 2] { s.append(v).unwrap(); }
        assert_eq!(s.clear(), [3, 1, 2]);
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        let fresh = s.append(4).unwrap();
        assert_eq!(contents(&s), [4]);
        assert_well_linked(&s);
        assert!(s.get(fresh).is_some());
    }

    #[test]
    fn handles_from_before_clear_are_stale() {
        let mut s = OrderedSequence::new();
        let old = s.append(1).unwrap();
        s.clear();
        s.append(2).unwrap();
        assert!(s.get(old).is_none());
        assert_eq!(s.remove(old), Err(PlasmidError::InvalidHandle));
    }

    #[test]
    fn iterates_backwards() {
        let mut s = OrderedSequence::new();
        for v in 1..=4 { s.insert_at(v, v as usize).unwrap(); }
        assert_eq!(s.iter().rev().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);
        let mut it = s.iter();
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 2);
        assert_eq!(s.handles().count(), 4);
    }

    #[test]
    fn mixed_mutations_keep_links_consistent() {
        let mut s = OrderedSequence::new();
        let mut handles = Vec::new();
        for i in 0..20u32 {
            handles.push(s.insert_at(i, (i as usize * 7) % 5).unwrap());
            if i % 3 == 0 {
                let h = handles.remove(0);
                s.remove(h).unwrap();
            }
            assert_well_linked(&s);
        }
        assert_eq!(s.len(), handles.len());
    }
}

use std::ops::RangeBounds;

use crate::arena::{Arena, Id};
use crate::error::SequenceError;
use crate::traits::RangeSumSequence;
use crate::util::normalize_range;

/// Node capacity used by [`SplaySequence::new`], dummies included.
pub const DEFAULT_CAPACITY: usize = 200_005;

/// Dynamic `i64` array with positional insert/delete, range add and range sum.
///
/// Splay tree over implicit keys stored in a fixed arena. Two dummy nodes
/// always sit at in-order ranks `1` and `len + 2`, so the element at position
/// `pos` has rank `pos + 2` and every range has a node on each side of it.
///
/// Deleted nodes are not reclaimed: each `insert` consumes one slot for the
/// rest of the sequence's life, until the next [`SplaySequence::build`].
#[derive(Clone, Debug)]
pub struct SplaySequence {
    arena: Arena,
    root: Id,
}

impl SplaySequence {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Panics if `capacity` cannot hold the two dummy nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 2, "capacity must leave room for the two dummies");
        let mut seq = Self {
            arena: Arena::with_capacity(capacity),
            root: Id::NIL,
        };
        seq.link_fresh(&[]);
        seq
    }

    pub fn len(&self) -> usize {
        self.size(self.root) - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Slots still available for `insert` before the next `build`.
    pub fn remaining_capacity(&self) -> usize {
        self.arena.remaining()
    }

    /// Discards the current content and the whole arena, then lays out
    /// `elements` as a balanced tree between the two dummies.
    ///
    /// On `CapacityExhausted` the current content is left untouched.
    pub fn build(&mut self, elements: &[i64]) -> Result<(), SequenceError> {
        let capacity = self.arena.capacity();
        if elements.len() > capacity - 2 {
            log::warn!(
                "cannot build {} elements into an arena of {} nodes",
                elements.len(),
                capacity
            );
            return Err(SequenceError::CapacityExhausted { capacity });
        }
        self.link_fresh(elements);
        log::debug!(
            "built sequence of {} elements, {} slots left",
            elements.len(),
            self.arena.remaining()
        );
        Ok(())
    }

    pub fn insert(&mut self, pos: usize, value: i64) -> Result<(), SequenceError> {
        let len = self.len();
        let err = SequenceError::PositionOutOfRange { pos, len };
        if pos > len {
            return Err(err);
        }
        let x = self.arena.allocate(value, Id::NIL)?;

        let prev = self.splay_rank(pos + 1, Id::NIL).ok_or(err)?;
        let next = self.splay_rank(pos + 2, prev).ok_or(err)?;
        debug_assert!(self.arena.node(next).ch[0].is_nil());

        self.arena.node_mut(x).p = next;
        self.arena.node_mut(next).ch[0] = x;
        self.push_up(next);
        self.push_up(prev);
        log::trace!("inserted {value} at {pos}");
        Ok(())
    }

    /// Removes the element at `pos` and returns its value.
    pub fn delete(&mut self, pos: usize) -> Result<i64, SequenceError> {
        let len = self.len();
        if pos >= len {
            return Err(SequenceError::PositionOutOfRange { pos, len });
        }
        let x = self
            .isolate(pos, pos + 1)
            .ok_or(SequenceError::PositionOutOfRange { pos, len })?;
        let next = self.arena.node(x).p;
        let value = self.arena.node(x).key;

        self.arena.node_mut(next).ch[0] = Id::NIL;
        self.arena.node_mut(x).p = Id::NIL;
        self.push_up(next);
        self.push_up(self.root);
        log::trace!("deleted {value} at {pos}");
        Ok(value)
    }

    /// Adds `delta` to every element in `range`. Empty ranges are a no-op.
    pub fn update_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        delta: i64,
    ) -> Result<(), SequenceError> {
        let len = self.len();
        let Some((start, end)) = normalize_range(range, len)? else {
            return Ok(());
        };
        let x = self
            .isolate(start, end)
            .ok_or(SequenceError::RangeOutOfBounds { start, end, len })?;
        self.apply_lazy(x, delta);

        let next = self.arena.node(x).p;
        self.push_up(next);
        self.push_up(self.arena.node(next).p);
        log::trace!("added {delta} to [{start}, {end})");
        Ok(())
    }

    /// Sum of the elements in `range`; `0` for an empty range.
    pub fn query_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<i64, SequenceError> {
        let len = self.len();
        let Some((start, end)) = normalize_range(range, len)? else {
            return Ok(0);
        };
        let x = self
            .isolate(start, end)
            .ok_or(SequenceError::RangeOutOfBounds { start, end, len })?;
        Ok(self.arena.node(x).sum)
    }

    pub fn get(&mut self, pos: usize) -> Option<i64> {
        if pos >= self.len() {
            return None;
        }
        let x = self.splay_rank(pos + 2, Id::NIL)?;
        Some(self.arena.node(x).key)
    }

    /// Current elements in order, with every pending add resolved.
    pub fn to_vec(&mut self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.size(self.root));
        let mut stack = Vec::new();
        let mut x = self.root;
        loop {
            while !x.is_nil() {
                self.push_down(x);
                stack.push(x);
                x = self.arena.node(x).ch[0];
            }
            let Some(y) = stack.pop() else {
                break;
            };
            out.push(self.arena.node(y).key);
            x = self.arena.node(y).ch[1];
        }
        out.pop();
        out.remove(0);
        out
    }

    /// Resets the arena and links dummies around a balanced tree of
    /// `elements`. Callers check the capacity first.
    fn link_fresh(&mut self, elements: &[i64]) {
        debug_assert!(elements.len() + 2 <= self.arena.capacity());
        self.arena.reset();
        let head = self.arena.push(0, Id::NIL);
        let tail = self.arena.push(0, head);
        self.arena.node_mut(head).ch[1] = tail;

        let mid = self.build_subtree(elements, tail);
        self.arena.node_mut(tail).ch[0] = mid;
        self.push_up(tail);
        self.push_up(head);
        self.root = head;
    }

    fn build_subtree(&mut self, elements: &[i64], p: Id) -> Id {
        if elements.is_empty() {
            return Id::NIL;
        }
        let mid = (elements.len() - 1) / 2;
        let x = self.arena.push(elements[mid], p);
        let l = self.build_subtree(&elements[..mid], x);
        let r = self.build_subtree(&elements[mid + 1..], x);
        self.arena.node_mut(x).ch = [l, r];
        self.push_up(x);
        x
    }

    #[inline(always)]
    fn size(&self, x: Id) -> usize {
        self.arena.node(x).sz as usize
    }

    fn push_up(&mut self, x: Id) {
        if x.is_nil() {
            return;
        }
        let [l, r] = self.arena.node(x).ch;
        let (nl, nr) = (self.arena.node(l), self.arena.node(r));
        let sz = nl.sz + nr.sz + 1;
        let sum = nl.sum + nr.sum + self.arena.node(x).key;
        let nx = self.arena.node_mut(x);
        nx.sz = sz;
        nx.sum = sum;
    }

    fn apply_lazy(&mut self, x: Id, delta: i64) {
        if x.is_nil() {
            return;
        }
        let nx = self.arena.node_mut(x);
        nx.key += delta;
        nx.sum += delta * i64::from(nx.sz);
        nx.lazy += delta;
    }

    fn push_down(&mut self, x: Id) {
        if x.is_nil() {
            return;
        }
        let (lazy, [l, r]) = {
            let nx = self.arena.node(x);
            (nx.lazy, nx.ch)
        };
        if lazy == 0 {
            return;
        }
        self.apply_lazy(l, lazy);
        self.apply_lazy(r, lazy);
        self.arena.node_mut(x).lazy = 0;
    }

    /// `1` if `x` is a right child, `0` otherwise.
    #[inline(always)]
    fn side(&self, x: Id) -> usize {
        let p = self.arena.node(x).p;
        usize::from(self.arena.node(p).ch[1] == x)
    }

    fn rotate(&mut self, x: Id) {
        let y = self.arena.node(x).p;
        let z = self.arena.node(y).p;
        let dx = self.side(x);
        let dy = self.side(y);
        let b = self.arena.node(x).ch[dx ^ 1];

        if !z.is_nil() {
            self.arena.node_mut(z).ch[dy] = x;
        }
        self.arena.node_mut(x).p = z;

        self.arena.node_mut(y).ch[dx] = b;
        if !b.is_nil() {
            self.arena.node_mut(b).p = y;
        }

        self.arena.node_mut(x).ch[dx ^ 1] = y;
        self.arena.node_mut(y).p = x;

        self.push_up(y);
        self.push_up(x);
    }

    /// Rotates `x` up until its parent is `goal`; `Id::NIL` makes it the root.
    ///
    /// Tags are pushed grandparent, parent, self before every step.
    fn splay(&mut self, x: Id, goal: Id) {
        while self.arena.node(x).p != goal {
            let y = self.arena.node(x).p;
            let z = self.arena.node(y).p;
            if z != goal {
                self.push_down(z);
            }
            self.push_down(y);
            self.push_down(x);

            if z != goal {
                if self.side(x) == self.side(y) {
                    self.rotate(y);
                } else {
                    self.rotate(x);
                }
            }
            self.rotate(x);
        }
        if goal.is_nil() {
            self.root = x;
        }
    }

    /// Node at 1-based in-order `rank`, dummies included. Pushes tags along
    /// the path but does not splay.
    fn find_kth(&mut self, mut rank: usize) -> Option<Id> {
        if rank == 0 || rank > self.size(self.root) {
            return None;
        }
        let mut x = self.root;
        loop {
            self.push_down(x);
            let [l, r] = self.arena.node(x).ch;
            let lsz = self.size(l);
            if rank <= lsz {
                x = l;
            } else if rank == lsz + 1 {
                return Some(x);
            } else {
                rank -= lsz + 1;
                x = r;
            }
        }
    }

    fn splay_rank(&mut self, rank: usize, goal: Id) -> Option<Id> {
        let x = self.find_kth(rank)?;
        self.splay(x, goal);
        Some(x)
    }

    /// Brings positions `[start, end)` into one subtree and returns its root.
    ///
    /// The node before the range becomes the root and the node after it the
    /// root's right child; the range is that child's left subtree.
    fn isolate(&mut self, start: usize, end: usize) -> Option<Id> {
        debug_assert!(start < end && end <= self.len());
        let before = self.splay_rank(start + 1, Id::NIL)?;
        let after = self.splay_rank(end + 2, before)?;
        Some(self.arena.node(after).ch[0])
    }
}

impl Default for SplaySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeSumSequence for SplaySequence {
    fn len(&self) -> usize {
        self.len()
    }

    fn build(&mut self, elements: &[i64]) -> Result<(), SequenceError> {
        self.build(elements)
    }

    fn insert(&mut self, pos: usize, value: i64) -> Result<(), SequenceError> {
        self.insert(pos, value)
    }

    fn delete(&mut self, pos: usize) -> Result<i64, SequenceError> {
        self.delete(pos)
    }

    fn update_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        delta: i64,
    ) -> Result<(), SequenceError> {
        self.update_range(range, delta)
    }

    fn query_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<i64, SequenceError> {
        self.query_range(range)
    }
}

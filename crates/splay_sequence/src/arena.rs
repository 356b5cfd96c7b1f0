use crate::error::SequenceError;

/// Handle into an [`Arena`]. `Id::NIL` is the null handle.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Id(u32);

impl Id {
    pub(crate) const NIL: Self = Self(0);

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Node {
    pub(crate) p: Id,
    pub(crate) ch: [Id; 2],
    pub(crate) key: i64,
    pub(crate) sum: i64,
    /// Pending add for the children, already folded into `key` and `sum`.
    pub(crate) lazy: i64,
    pub(crate) sz: u32,
}

impl Node {
    fn new(key: i64, p: Id) -> Self {
        Self {
            p,
            ch: [Id::NIL, Id::NIL],
            key,
            sum: key,
            lazy: 0,
            sz: 1,
        }
    }
}

/// Fixed-capacity node table.
///
/// Slot 0 holds the null sentinel (`sz == 0`, `sum == 0`) so aggregates of an
/// absent child can be read without a branch. Slots are handed out in order
/// and never reclaimed; only [`Arena::reset`] empties the table.
#[derive(Clone, Debug)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
    capacity: usize,
}

impl Arena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity < u32::MAX as usize,
            "arena capacity must fit in a u32 handle"
        );
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::default());
        Self { nodes, capacity }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of handles given out since the last reset.
    pub(crate) fn allocated(&self) -> usize {
        self.nodes.len() - 1
    }

    pub(crate) fn remaining(&self) -> usize {
        self.capacity - self.allocated()
    }

    pub(crate) fn reset(&mut self) {
        self.nodes.truncate(1);
    }

    pub(crate) fn allocate(&mut self, key: i64, p: Id) -> Result<Id, SequenceError> {
        if self.remaining() == 0 {
            log::warn!("node arena exhausted at capacity {}", self.capacity);
            return Err(SequenceError::CapacityExhausted {
                capacity: self.capacity,
            });
        }
        Ok(self.push(key, p))
    }

    /// Unchecked `allocate`, for callers that sized the batch up front.
    pub(crate) fn push(&mut self, key: i64, p: Id) -> Id {
        debug_assert!(self.remaining() > 0);
        let x = Id(self.nodes.len() as u32);
        self.nodes.push(Node::new(key, p));
        x
    }

    #[inline(always)]
    pub(crate) fn node(&self, x: Id) -> &Node {
        debug_assert!(x.idx() < self.nodes.len());
        &self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, x: Id) -> &mut Node {
        debug_assert!(!x.is_nil(), "the null sentinel is never written");
        &mut self.nodes[x.idx()]
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Id};
    use crate::error::SequenceError;

    #[test]
    fn handles_start_after_sentinel() {
        let mut arena = Arena::with_capacity(3);
        let a = arena.allocate(7, Id::NIL).unwrap();
        let b = arena.allocate(-2, a).unwrap();
        assert_eq!(a.idx(), 1);
        assert_eq!(b.idx(), 2);
        assert_eq!(arena.node(b).p, a);
        assert_eq!(arena.node(b).sum, -2);
        assert_eq!(arena.node(b).sz, 1);
        assert_eq!(arena.node(Id::NIL).sz, 0);
        assert_eq!(arena.allocated(), 2);
        assert_eq!(arena.remaining(), 1);
    }

    #[test]
    fn allocation_past_capacity_fails() {
        let mut arena = Arena::with_capacity(2);
        arena.allocate(1, Id::NIL).unwrap();
        arena.allocate(2, Id::NIL).unwrap();
        assert_eq!(
            arena.allocate(3, Id::NIL),
            Err(SequenceError::CapacityExhausted { capacity: 2 })
        );
        assert_eq!(arena.allocated(), 2);
    }

    #[test]
    fn reset_reclaims_everything() {
        let mut arena = Arena::with_capacity(1);
        arena.allocate(1, Id::NIL).unwrap();
        arena.reset();
        assert_eq!(arena.remaining(), 1);
        assert_eq!(arena.allocate(5, Id::NIL).map(Id::idx), Ok(1));
    }
}

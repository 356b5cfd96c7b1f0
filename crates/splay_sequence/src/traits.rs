use std::ops::RangeBounds;

use crate::error::SequenceError;

/// Positional sequence of `i64` with range add and range sum.
///
/// Positions are 0-based. An empty range is always valid: updates on it do
/// nothing and queries on it return `0`.
pub trait RangeSumSequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the whole content with `elements`.
    fn build(&mut self, elements: &[i64]) -> Result<(), SequenceError>;
    fn insert(&mut self, pos: usize, value: i64) -> Result<(), SequenceError>;
    fn delete(&mut self, pos: usize) -> Result<i64, SequenceError>;
    fn update_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        delta: i64,
    ) -> Result<(), SequenceError>;
    fn query_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<i64, SequenceError>;
}

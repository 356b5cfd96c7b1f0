use std::ops::RangeBounds;

use crate::error::SequenceError;
use crate::traits::RangeSumSequence;
use crate::util::normalize_range;

/// Plain `Vec` model of [`RangeSumSequence`] with linear-time operations.
///
/// Used as the reference the splay tree is checked and benchmarked against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NaiveSequence {
    values: Vec<i64>,
}

impl NaiveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    pub fn build(&mut self, elements: &[i64]) -> Result<(), SequenceError> {
        self.values.clear();
        self.values.extend_from_slice(elements);
        Ok(())
    }

    pub fn insert(&mut self, pos: usize, value: i64) -> Result<(), SequenceError> {
        let len = self.values.len();
        if pos > len {
            return Err(SequenceError::PositionOutOfRange { pos, len });
        }
        self.values.insert(pos, value);
        Ok(())
    }

    pub fn delete(&mut self, pos: usize) -> Result<i64, SequenceError> {
        let len = self.values.len();
        if pos >= len {
            return Err(SequenceError::PositionOutOfRange { pos, len });
        }
        Ok(self.values.remove(pos))
    }

    pub fn update_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        delta: i64,
    ) -> Result<(), SequenceError> {
        if let Some((start, end)) = normalize_range(range, self.values.len())? {
            for value in &mut self.values[start..end] {
                *value += delta;
            }
        }
        Ok(())
    }

    pub fn query_range<R: RangeBounds<usize>>(&self, range: R) -> Result<i64, SequenceError> {
        Ok(match normalize_range(range, self.values.len())? {
            Some((start, end)) => self.values[start..end].iter().sum(),
            None => 0,
        })
    }
}

impl RangeSumSequence for NaiveSequence {
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
        NaiveSequence::query_range(self, range)
    }
}

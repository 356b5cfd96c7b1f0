use std::ops::{Bound, RangeBounds};

use crate::error::SequenceError;

/// Resolves `range` to a half-open `[start, end)` over a sequence of `len`.
///
/// Returns `Ok(None)` for an empty range, whatever its position.
pub(crate) fn normalize_range<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<Option<(usize, usize)>, SequenceError> {
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(len),
    };

    match (start, end) {
        (Some(start), Some(end)) if start >= end => Ok(None),
        (Some(start), Some(end)) if end <= len => Ok(Some((start, end))),
        (None, _) => Ok(None),
        (start, end) => Err(SequenceError::RangeOutOfBounds {
            start: start.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            len,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_range;
    use crate::error::SequenceError;

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_ranges_resolve_to_none() {
        assert_eq!(normalize_range(0..0, 0), Ok(None));
        assert_eq!(normalize_range(2..=1, 5), Ok(None));
        assert_eq!(normalize_range(9..3, 5), Ok(None));
        assert_eq!(normalize_range(7..7, 5), Ok(None));
    }

    #[test]
    fn inclusive_and_unbounded_ranges() {
        assert_eq!(normalize_range(1..=3, 5), Ok(Some((1, 4))));
        assert_eq!(normalize_range(.., 5), Ok(Some((0, 5))));
        assert_eq!(normalize_range(2.., 5), Ok(Some((2, 5))));
        assert_eq!(normalize_range(..=0, 5), Ok(Some((0, 1))));
    }

    #[test]
    fn past_the_end_is_rejected() {
        assert_eq!(
            normalize_range(3..=5, 5),
            Err(SequenceError::RangeOutOfBounds {
                start: 3,
                end: 6,
                len: 5
            })
        );
        assert_eq!(
            normalize_range(0..=usize::MAX, 5),
            Err(SequenceError::RangeOutOfBounds {
                start: 0,
                end: usize::MAX,
                len: 5
            })
        );
    }
}

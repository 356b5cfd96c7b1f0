#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("node arena exhausted: capacity is {capacity} nodes")]
    CapacityExhausted { capacity: usize },
    #[error("position {pos} out of range for sequence of length {len}")]
    PositionOutOfRange { pos: usize, len: usize },
    #[error("range [{start}, {end}) out of bounds for sequence of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

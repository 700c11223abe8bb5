//! Error types shared across the crate.

use crate::shape::Shape;

/// Error type for every fallible koto operation.
///
/// All violations are detected eagerly at the point of the offending call
/// (construction time for shape mismatches, call time for axis and index
/// errors) and are fatal to the operation that raised them: no operation
/// ever returns a partially filled array.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Two operands cannot be broadcast together, or an operation would
    /// change the total element count.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: Shape,
        actual: Shape,
    },

    /// Axis argument outside `[0, rank)`.
    #[error("axis out of bounds: axis {axis} for array with {ndim} dimensions")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// min/max/argmin/argmax invoked on zero-length input.
    #[error("empty sequence")]
    EmptySequence,

    /// Out-of-range element access through the checked accessor.
    #[error("index {index:?} out of bounds for shape {shape}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Shape,
    },

    /// Transpose given an axis list that is not a bijection on `[0, rank)`.
    #[error("invalid axis for this array: {axes:?}")]
    InvalidPermutation { axes: Vec<usize> },

    /// An expression was realized into an array type of the wrong rank.
    #[error("rank mismatch: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

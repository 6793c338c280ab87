//! Error types for minitensor

use thiserror::Error;

/// Result type alias using minitensor's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
///
/// Host layers that surface errors as exceptions map each kind to their own
/// exception type (`TypeError`, `ValueError`, `IndexError`, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong element or argument kind
    Type,
    /// Empty, non-homogeneous or ragged input data
    Data,
    /// Invalid dimension or incompatible element count
    Shape,
    /// Wrong number of indices or an index past the end of a dimension
    Index,
}

/// Errors that can occur in minitensor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A leaf of the input data is not a number
    #[error("TypeError: invalid element type {found}, expected int or float")]
    InvalidElementType {
        /// Description of what was found instead
        found: String,
    },

    /// A shape was given as something other than a list of integers
    #[error("TypeError: invalid shape type {found}, expected a list of integers")]
    InvalidShapeType {
        /// Description of what was found instead
        found: String,
    },

    /// Input data (or one of its nested sequences) has no elements
    #[error("DataError: empty data at depth {depth}")]
    EmptyData {
        /// Nesting depth of the empty sequence
        depth: usize,
    },

    /// Scalars and sequences are mixed at the same nesting level
    #[error("DataError: non-homogeneous data at depth {depth}")]
    NonHomogeneous {
        /// Nesting depth where the mix was found
        depth: usize,
    },

    /// Sibling sequences have different lengths
    #[error(
        "DataError: inconsistent sequence length at depth {depth}: expected {expected}, got {got}"
    )]
    InconsistentLength {
        /// Nesting depth of the offending sequence
        depth: usize,
        /// Length of the first sequence at this depth
        expected: usize,
        /// Length of the offending sequence
        got: usize,
    },

    /// A byte buffer does not hold a whole number of f32 values
    #[error("DataError: byte length {len} is not a multiple of {elem_size}")]
    ByteLength {
        /// Length of the buffer in bytes
        len: usize,
        /// Size of one element in bytes
        elem_size: usize,
    },

    /// Shape is empty or has a zero dimension
    #[error("ShapeError: invalid shape {shape:?}: {reason}")]
    InvalidShape {
        /// The rejected shape
        shape: Vec<usize>,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A host-supplied dimension is not a positive `usize`
    #[error("ShapeError: invalid dimension {dim} at axis {axis}: {reason}")]
    InvalidDim {
        /// Position of the dimension in the shape
        axis: usize,
        /// The dimension as supplied (wide enough for any i64 or u64)
        dim: i128,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Element counts of two shapes differ
    #[error("ShapeError: cannot reshape size {size} into shape {shape:?}")]
    ReshapeMismatch {
        /// Element count of the source
        size: usize,
        /// Requested shape
        shape: Vec<usize>,
    },

    /// Data length does not match the element count of a shape
    #[error("ShapeError: {len} elements cannot fill shape {shape:?}")]
    LengthMismatch {
        /// Number of elements supplied
        len: usize,
        /// Target shape
        shape: Vec<usize>,
    },

    /// Product of the dimensions does not fit in usize
    #[error("ShapeError: element count of shape {shape:?} overflows")]
    ElementCountOverflow {
        /// The offending shape
        shape: Vec<usize>,
    },

    /// View is not an offset-0 row-major view of its storage
    #[error("ShapeError: operation requires a contiguous view with offset 0")]
    NotContiguous,

    /// Number of indices differs from the tensor rank
    #[error("IndexError: dimension mismatch: expected {expected} indices, got {got}")]
    IndexRankMismatch {
        /// Tensor rank
        expected: usize,
        /// Number of indices supplied
        got: usize,
    },

    /// Index past the end of a dimension
    #[error("IndexError: index {index} is out of bounds for dimension {dim} with size {size}")]
    IndexOutOfBounds {
        /// Dimension being indexed
        dim: usize,
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Flat position outside the storage buffer
    #[error("IndexError: storage index {index} is out of bounds for storage of length {len}")]
    StorageOutOfBounds {
        /// The invalid flat position
        index: usize,
        /// Storage length
        len: usize,
    },
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidElementType { .. } | Self::InvalidShapeType { .. } => ErrorKind::Type,
            Self::EmptyData { .. }
            | Self::NonHomogeneous { .. }
            | Self::InconsistentLength { .. }
            | Self::ByteLength { .. } => ErrorKind::Data,
            Self::InvalidShape { .. }
            | Self::InvalidDim { .. }
            | Self::ReshapeMismatch { .. }
            | Self::LengthMismatch { .. }
            | Self::ElementCountOverflow { .. }
            | Self::NotContiguous => ErrorKind::Shape,
            Self::IndexRankMismatch { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::StorageOutOfBounds { .. } => ErrorKind::Index,
        }
    }

    /// Create an invalid shape error from an unsigned shape
    pub fn invalid_shape(shape: &[usize], reason: &'static str) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
            reason,
        }
    }

    /// Create a reshape mismatch error
    pub fn reshape_mismatch(size: usize, shape: &[usize]) -> Self {
        Self::ReshapeMismatch {
            size,
            shape: shape.to_vec(),
        }
    }

    /// Create an invalid element type error
    pub fn invalid_element(found: impl Into<String>) -> Self {
        Self::InvalidElementType {
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::invalid_element("str").kind(), ErrorKind::Type);
        assert_eq!(Error::EmptyData { depth: 0 }.kind(), ErrorKind::Data);
        assert_eq!(Error::reshape_mismatch(4, &[3]).kind(), ErrorKind::Shape);
        assert_eq!(Error::NotContiguous.kind(), ErrorKind::Shape);
        assert_eq!(
            Error::IndexRankMismatch {
                expected: 2,
                got: 1
            }
            .kind(),
            ErrorKind::Index
        );
    }

    #[test]
    fn test_invalid_shape_reports_dims_unchanged() {
        let err = Error::invalid_shape(&[usize::MAX, 0], "dimensions must be positive");
        assert_eq!(
            err.to_string(),
            format!("ShapeError: invalid shape [{}, 0]: dimensions must be positive", usize::MAX)
        );
    }

    #[test]
    fn test_invalid_dim_message() {
        let err = Error::InvalidDim {
            axis: 1,
            dim: -3,
            reason: "dimensions must be positive",
        };
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(
            err.to_string(),
            "ShapeError: invalid dimension -3 at axis 1: dimensions must be positive"
        );
    }

    #[test]
    fn test_reshape_message() {
        let err = Error::reshape_mismatch(4, &[3, 2]);
        assert_eq!(
            err.to_string(),
            "ShapeError: cannot reshape size 4 into shape [3, 2]"
        );
    }
}

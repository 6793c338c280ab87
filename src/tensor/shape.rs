//! Shape type and shape arithmetic

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Stack allocation threshold for dimensions
/// Most tensors have 4 or fewer dimensions, so we stack-allocate up to 4
pub(crate) const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
///
/// A `Shape` is only a container; use [`validate_shape`] before treating it
/// as the shape of a tensor.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Create an empty shape.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Push a dimension.
    pub fn push(&mut self, dim: usize) {
        self.0.push(dim);
    }

    /// View shape as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// Number of dimensions in this shape.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl From<Vec<usize>> for Shape {
    fn from(value: Vec<usize>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl From<&[usize]> for Shape {
    fn from(value: &[usize]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(value: [usize; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<usize> for Shape {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check that `shape` can describe a tensor: at least one dimension, every
/// dimension positive, element count representable.
pub fn validate_shape(shape: &[usize]) -> Result<()> {
    element_count(shape).map(|_| ())
}

/// Total number of elements described by `shape`
///
/// # Errors
///
/// `InvalidShape` for an empty shape or a zero dimension,
/// `ElementCountOverflow` if the product does not fit in `usize`.
pub fn element_count(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Err(Error::invalid_shape(shape, "shape cannot be empty"));
    }
    if shape.contains(&0) {
        return Err(Error::invalid_shape(
            shape,
            "dimensions must be positive",
        ));
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| Error::ElementCountOverflow {
            shape: shape.to_vec(),
        })
}

/// Check that a tensor of `old_shape` can be reinterpreted as `new_shape`
///
/// Both shapes must be valid and describe the same number of elements.
pub fn validate_reshape(old_shape: &[usize], new_shape: &[usize]) -> Result<()> {
    let old_count = element_count(old_shape)?;
    let new_count = element_count(new_shape)?;
    if old_count != new_count {
        return Err(Error::reshape_mismatch(old_count, new_shape));
    }
    Ok(())
}

/// Convert signed dimensions supplied by a host layer into a [`Shape`]
pub fn shape_from_i64(dims: &[i64]) -> Result<Shape> {
    if dims.is_empty() {
        return Err(Error::invalid_shape(&[], "shape cannot be empty"));
    }
    let shape = dims
        .iter()
        .enumerate()
        .map(|(axis, &dim)| checked_dim(axis, i128::from(dim)))
        .collect::<Result<Shape>>()?;
    validate_shape(&shape)?;
    Ok(shape)
}

/// Check one host-supplied dimension; `i128` holds any `i64` or `u64`
pub(crate) fn checked_dim(axis: usize, dim: i128) -> Result<usize> {
    if dim <= 0 {
        return Err(Error::InvalidDim {
            axis,
            dim,
            reason: "dimensions must be positive",
        });
    }
    usize::try_from(dim).map_err(|_| Error::InvalidDim {
        axis,
        dim,
        reason: "dimension does not fit in usize",
    })
}

/// Convert a flat row-major position into a multi-index for `shape`
///
/// # Errors
///
/// Fails like [`element_count`] for an invalid `shape`, and with
/// `IndexOutOfBounds` (reported against the flattened tensor, `dim` 0) when
/// `flat` is not smaller than the element count.
pub fn unravel_index(mut flat: usize, shape: &[usize]) -> Result<Shape> {
    let count = element_count(shape)?;
    if flat >= count {
        return Err(Error::IndexOutOfBounds {
            dim: 0,
            index: flat,
            size: count,
        });
    }
    let mut index: SmallVec<[usize; STACK_DIMS]> = SmallVec::from_elem(0, shape.len());
    for (slot, &dim) in index.iter_mut().zip(shape.iter()).rev() {
        *slot = flat % dim;
        flat /= dim;
    }
    Ok(Shape(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(&[2, 3, 4]).unwrap(), 24);
        assert_eq!(element_count(&[7]).unwrap(), 7);
    }

    #[test]
    fn test_element_count_rejects_empty_and_zero() {
        assert_eq!(element_count(&[]).unwrap_err().kind(), ErrorKind::Shape);
        assert_eq!(element_count(&[2, 0]).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_element_count_overflow() {
        let err = element_count(&[usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, Error::ElementCountOverflow { .. }));
    }

    #[test]
    fn test_validate_reshape() {
        assert!(validate_reshape(&[4], &[2, 2]).is_ok());
        let err = validate_reshape(&[4], &[3]).unwrap_err();
        assert_eq!(err, Error::reshape_mismatch(4, &[3]));
    }

    #[test]
    fn test_shape_from_i64() {
        assert_eq!(shape_from_i64(&[2, 3]).unwrap().as_slice(), &[2, 3]);
        assert!(shape_from_i64(&[0]).is_err());
        assert_eq!(shape_from_i64(&[]).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_shape_from_i64_reports_offending_dim() {
        assert_eq!(
            shape_from_i64(&[2, -1]).unwrap_err(),
            Error::InvalidDim {
                axis: 1,
                dim: -1,
                reason: "dimensions must be positive",
            }
        );
    }

    #[test]
    fn test_invalid_shape_keeps_large_dims() {
        let err = element_count(&[usize::MAX, 0]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidShape {
                shape: vec![usize::MAX, 0],
                reason: "dimensions must be positive",
            }
        );
        assert!(!err.to_string().contains('-'));
    }

    #[test]
    fn test_unravel_index() {
        assert_eq!(unravel_index(0, &[2, 3]).unwrap().as_slice(), &[0, 0]);
        assert_eq!(unravel_index(4, &[2, 3]).unwrap().as_slice(), &[1, 1]);
        assert_eq!(unravel_index(23, &[2, 3, 4]).unwrap().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_unravel_index_rejects_zero_dim() {
        let err = unravel_index(0, &[2, 0]).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { .. }));
    }

    #[test]
    fn test_unravel_index_rejects_flat_past_end() {
        assert_eq!(
            unravel_index(6, &[2, 3]).unwrap_err(),
            Error::IndexOutOfBounds {
                dim: 0,
                index: 6,
                size: 6
            }
        );
    }
}

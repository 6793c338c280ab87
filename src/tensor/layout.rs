//! Layout: shape, strides, and offset for tensor memory layout

use super::shape::{Shape, validate_reshape, validate_shape};
use super::strides::{Strides, row_major_strides};
use crate::error::{Error, Result};
use std::fmt;

/// Layout describes how a view maps multi-indices onto its storage
///
/// Address of element at indices [i0, i1, ..., in]:
///   offset + i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
///
/// A `Layout` always has at least one dimension and every dimension is
/// positive; scalars are represented with shape `[1]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
    /// Offset: starting element index in the underlying storage
    offset: usize,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use minitensor::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]).unwrap();
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Result<Self> {
        let strides = row_major_strides(shape)?;
        Ok(Self {
            shape: Shape::from(shape),
            strides,
            offset: 0,
        })
    }

    /// Layout of a single-element tensor (shape `[1]`)
    pub fn scalar() -> Self {
        Self {
            shape: Shape::from([1]),
            strides: Strides::from([1]),
            offset: 0,
        }
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Get the offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Check if this is an offset-0 row-major layout
    pub fn is_contiguous(&self) -> bool {
        self.offset == 0
            && row_major_strides(&self.shape).is_ok_and(|expected| expected == self.strides)
    }

    /// Smallest storage length this layout can address without reading past the end
    pub fn required_storage_len(&self) -> usize {
        let span: usize = self
            .shape
            .iter()
            .zip(self.strides.iter())
            .map(|(&dim, &stride)| (dim - 1) * stride)
            .sum();
        self.offset + span + 1
    }

    /// Compute the storage index for the given multi-index
    ///
    /// # Errors
    ///
    /// `IndexRankMismatch` if `indices.len() != ndim`, `IndexOutOfBounds`
    /// if any index is not smaller than its dimension.
    pub fn index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(Error::IndexRankMismatch {
                expected: self.ndim(),
                got: indices.len(),
            });
        }

        let mut linear = self.offset;
        for (dim, ((&idx, &size), &stride)) in indices
            .iter()
            .zip(self.shape.iter())
            .zip(self.strides.iter())
            .enumerate()
        {
            if idx >= size {
                return Err(Error::IndexOutOfBounds {
                    dim,
                    index: idx,
                    size,
                });
            }
            linear += idx * stride;
        }

        Ok(linear)
    }

    /// Create a reshaped layout over the same elements
    ///
    /// Only offset-0 row-major layouts can be reshaped without copying.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self> {
        validate_shape(new_shape)?;
        if !self.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        validate_reshape(&self.shape, new_shape)?;
        Self::contiguous(new_shape)
    }

    /// Layout of sub-tensor `i` along dimension 0
    ///
    /// Returns `None` for a 1-D layout or an out-of-range `i`.
    pub(crate) fn select_first(&self, i: usize) -> Option<Self> {
        if self.ndim() < 2 || i >= self.shape[0] {
            return None;
        }
        Some(Self {
            shape: self.shape[1..].iter().copied().collect(),
            strides: Strides::from(&self.strides[1..]),
            offset: self.offset + i * self.strides[0],
        })
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?}, offset: {} }}",
            self.shape.as_slice(),
            self.strides.as_slice(),
            self.offset
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_contiguous_layout() {
        let layout = Layout::contiguous(&[2, 3, 4]).unwrap();
        assert_eq!(layout.shape(), &[2, 3, 4]);
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.elem_count(), 24);
        assert_eq!(layout.required_storage_len(), 24);
        assert!(layout.is_contiguous());
    }

    #[test]
    fn test_scalar_layout() {
        let layout = Layout::scalar();
        assert_eq!(layout.shape(), &[1]);
        assert_eq!(layout.elem_count(), 1);
        assert!(layout.is_contiguous());
    }

    #[test]
    fn test_reshape() {
        let layout = Layout::contiguous(&[2, 3, 4]).unwrap();
        let reshaped = layout.reshape(&[6, 4]).unwrap();
        assert_eq!(reshaped.shape(), &[6, 4]);
        assert_eq!(reshaped.strides(), &[4, 1]);
        assert!(reshaped.is_contiguous());
    }

    #[test]
    fn test_reshape_mismatch() {
        let layout = Layout::contiguous(&[2, 3]).unwrap();
        let err = layout.reshape(&[4]).unwrap_err();
        assert_eq!(err, Error::reshape_mismatch(6, &[4]));
        assert_eq!(layout.reshape(&[]).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_reshape_offset_view() {
        let layout = Layout::contiguous(&[2, 3]).unwrap();
        let row = layout.select_first(1).unwrap();
        assert_eq!(row.offset(), 3);
        assert!(!row.is_contiguous());
        assert_eq!(row.reshape(&[3]).unwrap_err(), Error::NotContiguous);
    }

    #[test]
    fn test_index() {
        let layout = Layout::contiguous(&[2, 3]).unwrap();
        assert_eq!(layout.index(&[0, 0]).unwrap(), 0);
        assert_eq!(layout.index(&[0, 2]).unwrap(), 2);
        assert_eq!(layout.index(&[1, 0]).unwrap(), 3);
        assert_eq!(layout.index(&[1, 2]).unwrap(), 5);
        assert_eq!(
            layout.index(&[2, 0]).unwrap_err(),
            Error::IndexOutOfBounds {
                dim: 0,
                index: 2,
                size: 2
            }
        );
        assert_eq!(
            layout.index(&[1]).unwrap_err(),
            Error::IndexRankMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_select_first() {
        let layout = Layout::contiguous(&[2, 3, 4]).unwrap();
        let sub = layout.select_first(1).unwrap();
        assert_eq!(sub.shape(), &[3, 4]);
        assert_eq!(sub.strides(), &[4, 1]);
        assert_eq!(sub.offset(), 12);
        assert_eq!(sub.index(&[2, 3]).unwrap(), 23);
        assert!(layout.select_first(2).is_none());
        assert!(Layout::contiguous(&[3]).unwrap().select_first(0).is_none());
    }
}

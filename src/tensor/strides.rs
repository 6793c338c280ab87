//! Strides type: element offsets for tensor memory layout

use super::shape::{STACK_DIMS, validate_shape};
use crate::error::Result;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Strides type: element offsets between consecutive elements along each dimension
/// NOTE: Strides are in ELEMENTS, not bytes
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Strides(SmallVec<[usize; STACK_DIMS]>);

impl Strides {
    /// View strides as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl Deref for Strides {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Strides {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl From<&[usize]> for Strides {
    fn from(value: &[usize]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Strides {
    fn from(value: [usize; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

/// Compute row-major (C-order) strides for a shape
///
/// The last dimension has stride 1 and each earlier stride is the product of
/// all later dimensions.
///
/// # Example
/// ```
/// use minitensor::tensor::row_major_strides;
/// let strides = row_major_strides(&[2, 3, 4]).unwrap();
/// assert_eq!(strides.as_slice(), &[12, 4, 1]);
/// ```
pub fn row_major_strides(shape: &[usize]) -> Result<Strides> {
    validate_shape(shape)?;

    let mut strides: SmallVec<[usize; STACK_DIMS]> = SmallVec::from_elem(1, shape.len());
    // validate_shape guarantees the running product cannot overflow
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    Ok(Strides(strides))
}

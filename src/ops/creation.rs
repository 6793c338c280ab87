//! Tensor construction entry points
//!
//! Free-function forms of the [`Tensor`] constructors, matching the surface a
//! scripting layer exposes: `tensor(data)`, `empty(shape)`, `zeros(shape)`,
//! `ones(shape)`, `full(shape, value)` and `arange(start, step, shape)`.

use crate::error::Result;
use crate::tensor::{NestedData, Tensor};

/// Build a tensor from a scalar or nested sequence of numbers
///
/// # Example
///
/// ```
/// use minitensor::tensor;
///
/// let t = tensor(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
/// assert_eq!(t.shape(), &[2, 2]);
/// # Ok::<(), minitensor::error::Error>(())
/// ```
pub fn tensor(data: impl Into<NestedData>) -> Result<Tensor> {
    Tensor::from_data(data)
}

/// Tensor of the given shape with unspecified (zero-filled) contents
pub fn empty(shape: &[usize]) -> Result<Tensor> {
    Tensor::empty(shape)
}

/// Tensor of the given shape filled with `0.0`
pub fn zeros(shape: &[usize]) -> Result<Tensor> {
    Tensor::zeros(shape)
}

/// Tensor of the given shape filled with `1.0`
pub fn ones(shape: &[usize]) -> Result<Tensor> {
    Tensor::ones(shape)
}

/// Tensor of the given shape filled with `value`
pub fn full(shape: &[usize], value: f32) -> Result<Tensor> {
    Tensor::full(shape, value)
}

/// Tensor whose element at flat position `i` is `start + i * step`
///
/// Unlike a half-open numeric range, the element count comes from `shape`.
///
/// ```
/// use minitensor::arange;
///
/// let t = arange(0.0, 2.0, &[4])?;
/// assert_eq!(t.to_vec(), vec![0.0, 2.0, 4.0, 6.0]);
/// # Ok::<(), minitensor::error::Error>(())
/// ```
pub fn arange(start: f32, step: f32, shape: &[usize]) -> Result<Tensor> {
    Tensor::arange(start, step, shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    #[test]
    fn test_tensor_scalar() {
        let t = tensor(5).unwrap();
        assert_eq!(t.shape(), &[1]);
        assert_eq!(t.get(&[0]).unwrap(), 5.0);
    }

    #[test]
    fn test_tensor_ragged() {
        let err = tensor(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_zeros_shape() {
        let t = zeros(&[2, 3]).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert!(t.to_vec().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_invalid_shapes() {
        for result in [empty(&[]), zeros(&[0]), ones(&[3, 0]), full(&[], 1.0)] {
            assert!(matches!(result, Err(Error::InvalidShape { .. })));
        }
    }
}

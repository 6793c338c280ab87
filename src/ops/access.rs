//! View, element access and presentation entry points

use crate::error::Result;
use crate::tensor::Tensor;

/// Reinterpret `t` with a new shape without copying
///
/// The result shares storage with `t`; see [`Tensor::reshape`].
pub fn reshape(t: &Tensor, shape: &[usize]) -> Result<Tensor> {
    t.reshape(shape)
}

/// Read the element of `t` at `indices`
pub fn get(t: &Tensor, indices: &[usize]) -> Result<f32> {
    t.get(indices)
}

/// Write `value` into `t` at `indices`, visible through all views of its storage
pub fn set(t: &Tensor, indices: &[usize], value: f32) -> Result<()> {
    t.set(indices, value)
}

/// Bracketed text form of `t` using the default print options
pub fn to_string(t: &Tensor) -> String {
    t.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::creation::{arange, tensor};

    #[test]
    fn test_reshape_then_format() {
        let t = tensor([1, 2, 3, 4]).unwrap();
        let m = reshape(&t, &[2, 2]).unwrap();
        assert_eq!(to_string(&m), "[[1.0, 2.0], [3.0, 4.0]]");
    }

    #[test]
    fn test_set_through_alias() {
        let t = arange(0.0, 1.0, &[6]).unwrap();
        let m = reshape(&t, &[2, 3]).unwrap();
        set(&m, &[1, 0], -1.0).unwrap();
        assert_eq!(get(&t, &[3]).unwrap(), -1.0);
    }
}

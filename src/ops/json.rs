//! Construction from JSON values
//!
//! Lets a host layer that already speaks JSON hand over untyped data and
//! shapes. Values that are not numbers (or arrays of numbers) are rejected
//! with a `TypeError`-kind error before any storage is allocated.

use crate::error::{Error, Result};
use crate::tensor::{NestedData, Shape, Tensor, checked_dim, validate_shape};
use serde_json::Value;

/// Build a tensor from a JSON number or nested array of numbers
///
/// ```
/// use minitensor::ops::json::tensor_from_json;
///
/// let t = tensor_from_json(&serde_json::json!([[1, 2], [3, 4]]))?;
/// assert_eq!(t.to_string(), "[[1.0, 2.0], [3.0, 4.0]]");
/// # Ok::<(), minitensor::error::Error>(())
/// ```
pub fn tensor_from_json(value: &Value) -> Result<Tensor> {
    let data = NestedData::try_from(value)?;
    Tensor::from_nested(&data)
}

/// Parse a JSON array of positive integers as a shape
pub fn shape_from_json(value: &Value) -> Result<Shape> {
    let Value::Array(items) = value else {
        return Err(Error::InvalidShapeType {
            found: describe(value),
        });
    };
    let shape = items
        .iter()
        .enumerate()
        .map(|(axis, item)| {
            let dim = match (item.as_u64(), item.as_i64()) {
                (Some(dim), _) => i128::from(dim),
                (None, Some(dim)) => i128::from(dim),
                (None, None) => {
                    return Err(Error::InvalidShapeType {
                        found: describe(item),
                    });
                }
            };
            checked_dim(axis, dim)
        })
        .collect::<Result<Shape>>()?;
    validate_shape(&shape)?;
    Ok(shape)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

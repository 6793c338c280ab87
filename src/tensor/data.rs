//! Nested input data for tensor construction
//!
//! [`NestedData`] is a tree of scalars and sequences. Before a tensor is
//! built from it, [`NestedData::infer_shape`] checks the whole tree
//! structurally:
//!
//! - every sequence is non-empty,
//! - siblings are either all scalars or all sequences,
//! - sibling sequences have equal length.
//!
//! Only then is it flattened in row-major order, so a rejected input never
//! allocates storage.

use super::shape::Shape;
use crate::error::{Error, Result};

/// A scalar or an arbitrarily nested sequence of scalars
#[derive(Clone, Debug, PartialEq)]
pub enum NestedData {
    /// A single number
    Scalar(f32),
    /// A sequence of nested values
    Sequence(Vec<NestedData>),
}

impl NestedData {
    /// Whether this node is a scalar
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Infer the shape of this data and validate its structure
    ///
    /// A scalar has shape `[1]`.
    pub fn infer_shape(&self) -> Result<Shape> {
        let items = match self {
            Self::Scalar(_) => return Ok(Shape::from([1])),
            Self::Sequence(items) => items,
        };

        let mut shape = Shape::new();
        let mut level: Vec<&[NestedData]> = vec![items.as_slice()];
        let mut depth = 0;

        loop {
            // every sequence at this depth already has the same length
            let len = level[0].len();
            if len == 0 {
                return Err(Error::EmptyData { depth });
            }
            shape.push(len);

            let leaves = level[0][0].is_scalar();
            if level
                .iter()
                .flat_map(|seq| seq.iter())
                .any(|item| item.is_scalar() != leaves)
            {
                return Err(Error::NonHomogeneous { depth });
            }
            if leaves {
                return Ok(shape);
            }

            let mut next: Vec<&[NestedData]> = Vec::with_capacity(level.len() * len);
            let mut expected = None;
            for item in level.iter().flat_map(|seq| seq.iter()) {
                let Self::Sequence(children) = item else {
                    return Err(Error::NonHomogeneous { depth });
                };
                match expected {
                    None => expected = Some(children.len()),
                    Some(exp) if exp != children.len() => {
                        return Err(Error::InconsistentLength {
                            depth: depth + 1,
                            expected: exp,
                            got: children.len(),
                        });
                    }
                    Some(_) => {}
                }
                next.push(children.as_slice());
            }

            level = next;
            depth += 1;
        }
    }

    /// Flatten to row-major (depth-first, left-to-right) order
    ///
    /// Does not validate; call [`Self::infer_shape`] first.
    pub fn flatten(&self) -> Vec<f32> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<f32>) {
        match self {
            Self::Scalar(v) => out.push(*v),
            Self::Sequence(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Validate and flatten in one step
    pub fn to_parts(&self) -> Result<(Shape, Vec<f32>)> {
        let shape = self.infer_shape()?;
        Ok((shape, self.flatten()))
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NestedData {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::Scalar(value as f32)
                }
            }
        )*
    };
}

impl_from_number!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl<T: Into<NestedData>> From<Vec<T>> for NestedData {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<NestedData> + Clone> From<&[T]> for NestedData {
    fn from(value: &[T]) -> Self {
        Self::Sequence(value.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<NestedData>, const N: usize> From<[T; N]> for NestedData {
    fn from(value: [T; N]) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "json")]
impl TryFrom<&serde_json::Value> for NestedData {
    type Error = Error;

    /// Numbers become scalars and arrays become sequences; anything else is
    /// rejected with `InvalidElementType`.
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Number(n) => n
                .as_f64()
                .map(|v| Self::Scalar(v as f32))
                .ok_or_else(|| Error::invalid_element(format!("number {n}"))),
            Value::Array(items) => items
                .iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Self::Sequence),
            Value::Null => Err(Error::invalid_element("null")),
            Value::Bool(b) => Err(Error::invalid_element(format!("bool {b}"))),
            Value::String(s) => Err(Error::invalid_element(format!("string {s:?}"))),
            Value::Object(_) => Err(Error::invalid_element("object")),
        }
    }
}

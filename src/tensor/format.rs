//! Text rendering of tensor contents
//!
//! Tensors render as nested brackets mirroring their shape, elements separated
//! by `", "`:
//!
//! ```text
//! [[1.0, 2.0], [3.0, 4.0]]
//! ```
//!
//! Numbers use one of two fixed policies, chosen through [`PrintOptions`]:
//! - shortest round-trip (default): the shortest decimal text that parses
//!   back to the same `f32`, always with a fractional part (`1.0`, `0.1`,
//!   `-2.25`, `1e-7`), plus `inf`, `-inf` and `NaN`;
//! - fixed precision: `precision` digits after the point (`1.00`).
//!
//! Output depends only on shape and values, never on strides or storage.

use super::layout::Layout;
use super::storage::Storage;
use std::fmt::{self, Write};

/// Options controlling how tensor elements are printed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PrintOptions {
    /// Digits after the decimal point; `None` selects shortest round-trip
    pub precision: Option<usize>,
}

impl PrintOptions {
    /// Shortest round-trip formatting
    pub const fn shortest() -> Self {
        Self { precision: None }
    }

    /// Fixed number of digits after the decimal point
    pub const fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
        }
    }

    fn write_value<W: Write>(&self, out: &mut W, value: f32) -> fmt::Result {
        match self.precision {
            Some(p) => write!(out, "{value:.p$}"),
            // Debug for floats is shortest round-trip and keeps the ".0"
            None => write!(out, "{value:?}"),
        }
    }
}

/// Write the bracketed form of the view described by `layout` into `out`
pub(crate) fn write_tensor<W: Write>(
    out: &mut W,
    storage: &Storage,
    layout: &Layout,
    options: &PrintOptions,
) -> fmt::Result {
    storage.with_data(|data| write_level(out, data, layout, options))
}

fn write_level<W: Write>(
    out: &mut W,
    data: &[f32],
    layout: &Layout,
    options: &PrintOptions,
) -> fmt::Result {
    let len = layout.shape()[0];
    out.write_char('[')?;
    if layout.ndim() == 1 {
        let stride = layout.strides()[0];
        for i in 0..len {
            if i > 0 {
                out.write_str(", ")?;
            }
            let value = data.get(layout.offset() + i * stride).ok_or(fmt::Error)?;
            options.write_value(out, *value)?;
        }
    } else {
        for i in 0..len {
            if i > 0 {
                out.write_str(", ")?;
            }
            let sub = layout.select_first(i).ok_or(fmt::Error)?;
            write_level(out, data, &sub, options)?;
        }
    }
    out.write_char(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(values: Vec<f32>, shape: &[usize], options: PrintOptions) -> String {
        let storage = Storage::from_vec(values);
        let layout = Layout::contiguous(shape).unwrap();
        let mut out = String::new();
        write_tensor(&mut out, &storage, &layout, &options).unwrap();
        out
    }

    #[test]
    fn test_one_dim() {
        let s = render(vec![1.0, 2.5, -3.0], &[3], PrintOptions::default());
        assert_eq!(s, "[1.0, 2.5, -3.0]");
    }

    #[test]
    fn test_two_dim() {
        let s = render(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], PrintOptions::default());
        assert_eq!(s, "[[1.0, 2.0], [3.0, 4.0]]");
    }

    #[test]
    fn test_three_dim() {
        let values = (0..8).map(|v| v as f32).collect();
        let s = render(values, &[2, 2, 2], PrintOptions::default());
        assert_eq!(s, "[[[0.0, 1.0], [2.0, 3.0]], [[4.0, 5.0], [6.0, 7.0]]]");
    }

    #[test]
    fn test_fixed_precision() {
        let s = render(vec![1.0, 0.126], &[2], PrintOptions::with_precision(2));
        assert_eq!(s, "[1.00, 0.13]");
    }

    #[test]
    fn test_shortest_round_trip() {
        let s = render(vec![0.1, f32::INFINITY, f32::NAN], &[3], PrintOptions::shortest());
        assert_eq!(s, "[0.1, inf, NaN]");
    }
}

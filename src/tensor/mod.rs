//! Tensor types and operations
//!
//! This module provides the core `Tensor` type, an n-dimensional `f32` array
//! viewing a reference-counted [`Storage`] buffer through a [`Layout`].

mod core;
mod data;
mod format;
mod layout;
mod shape;
mod storage;
mod strides;

pub use core::Tensor;
pub use data::NestedData;
pub use format::PrintOptions;
pub use layout::Layout;
pub use shape::{
    Shape, element_count, shape_from_i64, unravel_index, validate_reshape, validate_shape,
};
pub(crate) use shape::checked_dim;
pub use storage::{Storage, WeakStorage};
pub use strides::{Strides, row_major_strides};

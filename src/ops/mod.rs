//! Tensor entry points
//!
//! Free functions over [`Tensor`](crate::tensor::Tensor), grouped by concern:
//!
//! ```text
//! creation  tensor, empty, zeros, ones, full, arange
//! access    reshape, get, set, to_string
//! json      tensor_from_json, shape_from_json   (feature "json")
//! ```

pub mod access;
pub mod creation;
#[cfg(feature = "json")]
pub mod json;

pub use access::{get, reshape, set, to_string};
pub use creation::{arange, empty, full, ones, tensor, zeros};

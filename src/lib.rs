//! # minitensor
//!
//! **A minimal n-dimensional `f32` tensor engine built on shared storage and strided views.**
//!
//! minitensor is the storage-and-view core a scripting layer can sit on: it builds
//! tensors from nested numbers, reinterprets their shape without copying, and gives
//! bounds-checked element access.
//!
//! ## Model
//!
//! - **Storage**: a fixed-length `f32` buffer behind an `Arc`; freed when the last
//!   view referencing it is dropped
//! - **Layout**: shape, row-major strides and offset of one view
//! - **Tensor**: a storage handle plus a layout; `reshape` returns a new view on
//!   the same storage, so writes through one view are seen by the other
//!
//! ## Quick Start
//!
//! ```rust
//! use minitensor::prelude::*;
//!
//! let t = tensor([1, 2, 3, 4])?;
//! let m = t.reshape(&[2, 2])?;
//! assert_eq!(m.to_string(), "[[1.0, 2.0], [3.0, 4.0]]");
//!
//! m.set(&[1, 1], 9.0)?;
//! assert_eq!(t.get(&[3])?, 9.0);
//! # Ok::<(), minitensor::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `json` (default): build tensors and shapes from `serde_json::Value`
//!
//! ## Logging
//!
//! Storage allocation and release, reshapes and rejected inputs are reported as
//! `tracing` events at `trace`/`debug` level. No subscriber is installed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ops;
pub mod tensor;

pub use ops::{arange, empty, full, get, ones, reshape, set, tensor, to_string, zeros};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::ops::{arange, empty, full, get, ones, reshape, set, tensor, zeros};
    pub use crate::tensor::{Layout, NestedData, PrintOptions, Shape, Storage, Tensor};
}

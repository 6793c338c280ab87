//! Core Tensor type

use super::data::NestedData;
use super::format::{PrintOptions, write_tensor};
use super::shape::element_count;
use super::{Layout, Storage};
use crate::error::{Error, Result};
use std::fmt;

/// N-dimensional `f32` array
///
/// `Tensor` is the fundamental data structure in minitensor. It consists of:
/// - **Storage**: Reference-counted, fixed-length `f32` buffer
/// - **Layout**: Shape, strides, and offset defining the view into storage
///
/// Every tensor has at least one dimension; a scalar is a tensor of shape `[1]`.
///
/// # Zero-Copy Views
///
/// `reshape`, `flatten` and `clone` create new tensors that share the same
/// underlying storage. Writes through [`Tensor::set`] are visible through
/// every view of that storage:
///
/// ```
/// use minitensor::prelude::*;
///
/// let a = Tensor::from_data([1.0, 2.0, 3.0, 4.0])?;
/// let b = a.reshape(&[2, 2])?; // shares storage with a
/// b.set(&[1, 1], 9.0)?;
/// assert_eq!(a.get(&[3])?, 9.0);
/// # Ok::<(), minitensor::error::Error>(())
/// ```
///
/// The buffer is released when the last view referencing it is dropped.
pub struct Tensor {
    /// Element buffer, shared between views
    storage: Storage,
    /// Shape, strides, offset
    layout: Layout,
}

impl Tensor {
    /// Create a tensor from storage and layout
    ///
    /// Fails with `StorageOutOfBounds` if the layout can address elements
    /// past the end of `storage`.
    pub fn from_parts(storage: Storage, layout: Layout) -> Result<Self> {
        let required = layout.required_storage_len();
        if required > storage.len() {
            return Err(Error::StorageOutOfBounds {
                index: required - 1,
                len: storage.len(),
            });
        }
        Ok(Self { storage, layout })
    }

    /// Build a tensor from a scalar or nested sequence of numbers
    ///
    /// The input is validated completely before any storage is allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use minitensor::prelude::*;
    ///
    /// let t = Tensor::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
    /// assert_eq!(t.shape(), &[2, 3]);
    ///
    /// let s = Tensor::from_data(5)?;
    /// assert_eq!(s.shape(), &[1]);
    /// # Ok::<(), minitensor::error::Error>(())
    /// ```
    pub fn from_data(data: impl Into<NestedData>) -> Result<Self> {
        Self::from_nested(&data.into())
    }

    /// Build a tensor from already-converted nested data
    pub fn from_nested(data: &NestedData) -> Result<Self> {
        let (shape, values) = data.to_parts().inspect_err(|err| {
            tracing::debug!(%err, "rejected tensor data");
        })?;
        Self::from_vec(values, &shape)
    }

    /// Create a tensor from row-major values and a shape
    ///
    /// Returns an error if `data.len()` does not equal the product of the
    /// `shape` dimensions.
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        if data.len() != layout.elem_count() {
            return Err(Error::LengthMismatch {
                len: data.len(),
                shape: shape.to_vec(),
            });
        }
        Ok(Self {
            storage: Storage::from_vec(data),
            layout,
        })
    }

    /// Create a tensor from native-endian `f32` bytes
    pub fn from_bytes(bytes: &[u8], shape: &[usize]) -> Result<Self> {
        let elem_size = std::mem::size_of::<f32>();
        if bytes.len() % elem_size != 0 {
            return Err(Error::ByteLength {
                len: bytes.len(),
                elem_size,
            });
        }
        // Copy into an f32 Vec first; `bytes` may not be 4-byte aligned.
        let mut values = vec![0.0f32; bytes.len() / elem_size];
        bytemuck::cast_slice_mut::<f32, u8>(&mut values).copy_from_slice(bytes);
        Self::from_vec(values, shape)
    }

    /// Create a tensor whose contents are unspecified
    ///
    /// Memory is zero-filled, so reading before writing is safe; callers
    /// should still not rely on the contents.
    pub fn empty(shape: &[usize]) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        Ok(Self {
            storage: Storage::new(layout.elem_count()),
            layout,
        })
    }

    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::full(shape, 0.0)
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::full(shape, 1.0)
    }

    /// Create a tensor filled with `value`
    pub fn full(shape: &[usize], value: f32) -> Result<Self> {
        let layout = Layout::contiguous(shape)?;
        Ok(Self {
            storage: Storage::filled(layout.elem_count(), value),
            layout,
        })
    }

    /// Create a tensor holding `start, start + step, start + 2*step, ...`
    /// in row-major order
    ///
    /// Each element is computed as `start + i * step` rather than by repeated
    /// addition, so rounding error does not accumulate along the range.
    pub fn arange(start: f32, step: f32, shape: &[usize]) -> Result<Self> {
        let len = element_count(shape)?;
        let values = (0..len).map(|i| start + i as f32 * step).collect();
        Self::from_vec(values, shape)
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Get the offset into storage
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Length along the first dimension
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.layout.shape()[0]
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Whether `self` and `other` are views of the same storage
    #[inline]
    pub fn shares_storage(&self, other: &Tensor) -> bool {
        self.storage.same_buffer(&other.storage)
    }

    // ===== View Operations (Zero-Copy) =====

    /// Reshape to a new shape (zero-copy)
    ///
    /// The result shares storage with `self`. Fails with `ReshapeMismatch`
    /// if the element counts differ and with `NotContiguous` for views that
    /// do not start at offset 0 with row-major strides.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let new_layout = self.layout.reshape(shape)?;
        tracing::trace!(from = ?self.shape(), to = ?shape, "reshape");

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Flatten to 1D (zero-copy)
    pub fn flatten(&self) -> Result<Self> {
        self.reshape(&[self.numel()])
    }

    // ===== Data Access =====

    /// Read the element at `indices`
    ///
    /// `indices` must have one entry per dimension, each smaller than the
    /// size of its dimension.
    pub fn get(&self, indices: &[usize]) -> Result<f32> {
        let index = self.layout.index(indices)?;
        self.storage.get(index)
    }

    /// Write `value` at `indices`
    ///
    /// Takes `&self`: the write goes to the shared storage and is visible
    /// through every view of it.
    pub fn set(&self, indices: &[usize], value: f32) -> Result<()> {
        let index = self.layout.index(indices)?;
        self.storage.set(index, value)
    }

    /// Copy the elements to a Vec in row-major order
    pub fn to_vec(&self) -> Vec<f32> {
        if self.is_contiguous() {
            let numel = self.numel();
            return self.storage.with_data(|data| data[..numel].to_vec());
        }
        let mut out = Vec::with_capacity(self.numel());
        self.storage
            .with_data(|data| collect_strided(data, &self.layout, &mut out));
        out
    }

    /// Copy the elements to native-endian bytes in row-major order
    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vec()).to_vec()
    }

    /// Render with explicit print options
    pub fn format_with(&self, options: &PrintOptions) -> String {
        WithOptions {
            tensor: self,
            options,
        }
        .to_string()
    }
}

/// `Display` adapter pairing a tensor with explicit print options
struct WithOptions<'a> {
    tensor: &'a Tensor,
    options: &'a PrintOptions,
}

impl fmt::Display for WithOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tensor(f, &self.tensor.storage, &self.tensor.layout, self.options)
    }
}

fn collect_strided(data: &[f32], layout: &Layout, out: &mut Vec<f32>) {
    match layout.ndim() {
        1 => {
            let stride = layout.strides()[0];
            out.extend((0..layout.shape()[0]).map(|i| data[layout.offset() + i * stride]));
        }
        _ => {
            // ndim >= 2 and i < shape[0], so every row is Some.
            for sub in (0..layout.shape()[0]).filter_map(|i| layout.select_first(i)) {
                collect_strided(data, &sub, out);
            }
        }
    }
}

impl Clone for Tensor {
    /// Clone creates a new view sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("offset", &self.offset())
            .field("storage", &self.storage)
            .finish()
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tensor(f, &self.storage, &self.layout, &PrintOptions::default())
    }
}

//! Storage: f32 buffer management with Arc-based sharing

use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Storage for tensor data
///
/// Storage wraps a fixed-length `f32` buffer with reference counting, enabling
/// zero-copy views (reshape, sub-tensor iteration) that share the underlying
/// buffer. Cloning a `Storage` retains the buffer; dropping a handle releases
/// it, and the buffer is deallocated when the last handle is dropped.
///
/// Writes go through an internal lock, so a write through one view is
/// immediately visible through every other view of the same storage.
pub struct Storage {
    inner: Arc<StorageInner>,
}

struct StorageInner {
    data: RwLock<Box<[f32]>>,
    /// Number of elements, fixed at allocation
    len: usize,
}

impl Storage {
    /// Allocate `len` zero-initialized elements
    pub fn new(len: usize) -> Self {
        Self::from_vec(vec![0.0; len])
    }

    /// Allocate `len` elements all set to `value`
    pub fn filled(len: usize, value: f32) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Take ownership of an already-populated buffer
    pub fn from_vec(data: Vec<f32>) -> Self {
        let len = data.len();
        tracing::trace!(len, "allocating storage");
        Self {
            inner: Arc::new(StorageInner {
                data: RwLock::new(data.into_boxed_slice()),
                len,
            }),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Read the element at flat position `index`
    pub fn get(&self, index: usize) -> Result<f32> {
        self.inner
            .data
            .read()
            .get(index)
            .copied()
            .ok_or(Error::StorageOutOfBounds {
                index,
                len: self.inner.len,
            })
    }

    /// Write `value` at flat position `index`
    pub fn set(&self, index: usize, value: f32) -> Result<()> {
        let mut data = self.inner.data.write();
        let slot = data.get_mut(index).ok_or(Error::StorageOutOfBounds {
            index,
            len: self.inner.len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Run `f` with shared access to the whole buffer
    pub(crate) fn with_data<T>(&self, f: impl FnOnce(&[f32]) -> T) -> T {
        f(&self.inner.data.read())
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if this is the only reference
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Check whether two handles refer to the same buffer
    #[inline]
    pub fn same_buffer(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Create a non-owning handle that observes whether the buffer is still alive
    pub fn downgrade(&self) -> WeakStorage {
        WeakStorage {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Copy the whole buffer to a Vec
    pub fn to_vec(&self) -> Vec<f32> {
        self.inner.data.read().to_vec()
    }
}

impl Clone for Storage {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Drop for StorageInner {
    fn drop(&mut self) {
        tracing::trace!(len = self.len, "releasing storage");
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.inner.len)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

/// Weak handle to a [`Storage`] buffer
///
/// Does not keep the buffer alive and does not count towards
/// [`Storage::ref_count`].
#[derive(Clone, Debug)]
pub struct WeakStorage {
    inner: Weak<StorageInner>,
}

impl WeakStorage {
    /// Whether the buffer has not been deallocated yet
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Recover a strong handle if the buffer is still alive
    pub fn upgrade(&self) -> Option<Storage> {
        self.inner.upgrade().map(|inner| Storage { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let storage = Storage::new(5);
        assert_eq!(storage.len(), 5);
        assert_eq!(storage.to_vec(), vec![0.0; 5]);
        assert_eq!(storage.ref_count(), 1);
        assert!(storage.is_unique());
    }

    #[test]
    fn test_get_set() {
        let storage = Storage::from_vec(vec![1.0, 2.0, 3.0]);
        storage.set(1, 9.0).unwrap();
        assert_eq!(storage.get(1).unwrap(), 9.0);
        assert_eq!(
            storage.get(3).unwrap_err(),
            Error::StorageOutOfBounds { index: 3, len: 3 }
        );
        assert!(storage.set(7, 0.0).is_err());
    }

    #[test]
    fn test_clone_shares_buffer() {
        let a = Storage::filled(4, 1.0);
        let b = a.clone();
        assert_eq!(a.ref_count(), 2);
        assert!(a.same_buffer(&b));

        b.set(0, 5.0).unwrap();
        assert_eq!(a.get(0).unwrap(), 5.0);

        drop(b);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn test_release_on_last_drop() {
        let a = Storage::new(3);
        let b = a.clone();
        let weak = a.downgrade();

        drop(a);
        assert!(weak.is_alive());
        drop(b);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_distinct_allocations() {
        let a = Storage::new(2);
        let b = Storage::new(2);
        assert!(!a.same_buffer(&b));
    }
}

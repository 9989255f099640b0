//! buffer/growable.rs
//! Raw element storage with the amortized growth policy.
//!
//! Summary: `len` elements are in use out of `cap` allocated ones.
//! Everything in `len..cap` is zeroed after growth so a caller that asks
//! for space and writes less never observes stale data.

use crate::constants::{GROWTH_STEP, MIN_CAPACITY};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("out of memory: cannot hold {requested} elements of {elem_size} bytes")]
    OutOfMemory { requested: usize, elem_size: usize },
}

/// Capacity chosen when `required` elements must fit in a buffer of `cap`.
///
/// Returns `None` when the size overflows. Doubling from 128 covers small
/// buffers; past 4096 the request is rounded up to the next multiple of
/// 4096, and an exact multiple still gains a full extra step.
pub fn next_capacity(cap: usize, required: usize) -> Option<usize> {
    if required <= cap {
        return Some(cap);
    }
    let mut u = cap.max(MIN_CAPACITY);
    while u < required && u < GROWTH_STEP {
        u += u;
    }
    if u < required {
        u = required.checked_add(GROWTH_STEP)? & !(GROWTH_STEP - 1);
    }
    Some(u)
}

#[derive(Debug, Clone, Default)]
pub struct GrowableBuffer<T> {
    // data.len() is the capacity
    data: Vec<T>,
    len: usize,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    pub fn new() -> Self {
        Self { data: Vec::new(), len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn avail(&self) -> usize {
        self.cap() - self.len
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Make room for `extra` more elements past `len`.
    pub fn ensure(&mut self, extra: usize) -> Result<(), BufferError> {
        let oom = |requested| BufferError::OutOfMemory {
            requested,
            elem_size: std::mem::size_of::<T>(),
        };
        let required = self.len.checked_add(extra).ok_or_else(|| oom(usize::MAX))?;
        if required <= self.cap() {
            return Ok(());
        }
        let u = next_capacity(self.cap(), required).ok_or_else(|| oom(required))?;
        self.reallocate(u, self.len).map_err(|_| oom(u))
    }

    /// Reallocate to exactly `n` elements when `n < cap`.
    pub fn shrink(&mut self, n: usize) -> Result<(), BufferError> {
        if n >= self.cap() {
            return Ok(());
        }
        if n == 0 {
            self.data = Vec::new();
            self.len = 0;
            return Ok(());
        }
        let keep = n.min(self.len);
        self.reallocate(n, keep).map_err(|_| BufferError::OutOfMemory {
            requested: n,
            elem_size: std::mem::size_of::<T>(),
        })?;
        self.len = keep;
        Ok(())
    }

    fn reallocate(&mut self, cap: usize, keep: usize) -> Result<(), std::collections::TryReserveError> {
        let mut v = Vec::new();
        v.try_reserve_exact(cap)?;
        v.extend_from_slice(&self.data[..keep]);
        v.resize(cap, T::default());
        self.data = v;
        Ok(())
    }

    /// Set the logical length; the caller guarantees `len <= cap`.
    #[inline]
    pub(crate) fn set_len_unchecked(&mut self, len: usize) {
        debug_assert!(len <= self.cap());
        self.len = len;
    }

    /// All `cap` elements, used or not.
    #[inline]
    pub fn storage(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn storage_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_zeroes_the_tail() {
        let mut b = GrowableBuffer::<u16>::new();
        b.ensure(3).unwrap();
        b.storage_mut()[..3].copy_from_slice(&[7, 8, 9]);
        b.set_len_unchecked(3);
        b.ensure(500).unwrap();
        assert_eq!(&b.storage()[..3], &[7, 8, 9]);
        assert!(b.storage()[3..].iter().all(|&x| x == 0));
    }

    #[test]
    fn overflowing_request_is_out_of_memory() {
        let mut b = GrowableBuffer::<u8>::new();
        b.ensure(1).unwrap();
        b.set_len_unchecked(1);
        assert!(matches!(b.ensure(usize::MAX), Err(BufferError::OutOfMemory { .. })));
    }
}

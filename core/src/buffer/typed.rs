//! buffer/typed.rs
//! Typed view over a growable buffer.
//!
//! The write protocol is get / write / commit:
//!
//! ```
//! use zstream_core::buffer::TypedBuffer;
//!
//! let mut b = TypedBuffer::<u8>::new();
//! let area = b.get(8192).unwrap();
//! area[..4].copy_from_slice(b"abcd");
//! // length is still 0 until the used part is committed
//! b.commit(4);
//! assert_eq!(b.as_slice(), b"abcd");
//! ```
//!
//! The slice handed out by `get` borrows the buffer, so it cannot outlive
//! the next call that might reallocate.

use std::fmt;

use super::element::Element;
use super::growable::{BufferError, GrowableBuffer};

#[derive(Clone, Default)]
pub struct TypedBuffer<T: Element> {
    raw: GrowableBuffer<T>,
}

impl<T: Element> TypedBuffer<T> {
    pub fn new() -> Self {
        Self { raw: GrowableBuffer::new() }
    }

    /// Empty buffer with room for at least `n` elements.
    pub fn with_capacity(n: usize) -> Result<Self, BufferError> {
        let mut b = Self::new();
        b.reserve(n)?;
        Ok(b)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.cap()
    }

    #[inline]
    pub fn avail(&self) -> usize {
        self.raw.avail()
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        self.raw.elem_size()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.raw.storage()[..self.raw.len()]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.raw.len();
        &mut self.raw.storage_mut()[..len]
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Room for `n` more elements without another reallocation.
    pub fn reserve(&mut self, n: usize) -> Result<&mut Self, BufferError> {
        self.raw.ensure(n)?;
        Ok(self)
    }

    pub fn shrink(&mut self, n: usize) -> Result<&mut Self, BufferError> {
        self.raw.shrink(n)?;
        Ok(self)
    }

    /// Writable area of `n` elements right after the current length.
    ///
    /// Two calls with nothing in between return the same area; `get`
    /// reserves nothing, it only guarantees the room.
    pub fn get(&mut self, n: usize) -> Result<&mut [T], BufferError> {
        self.raw.ensure(n)?;
        let len = self.raw.len();
        Ok(&mut self.raw.storage_mut()[len..len + n])
    }

    /// Grow the length by `n`, never past capacity.
    pub fn commit(&mut self, n: usize) -> &mut Self {
        let k = self.raw.len().saturating_add(n).min(self.raw.cap());
        self.raw.set_len_unchecked(k);
        self
    }

    /// Force the length to `n`; ignored when `n` exceeds capacity.
    pub fn set_len(&mut self, n: usize) -> bool {
        if n <= self.raw.cap() {
            self.raw.set_len_unchecked(n);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) -> &mut Self {
        self.raw.set_len_unchecked(0);
        self
    }

    pub fn push(&mut self, value: T) -> Result<&mut Self, BufferError> {
        self.get(1)?[0] = value;
        Ok(self.commit(1))
    }

    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<&mut Self, BufferError> {
        self.get(values.len())?.copy_from_slice(values);
        Ok(self.commit(values.len()))
    }

    /// Append every element of `other`, converting it to `T`.
    pub fn append<U: Element>(&mut self, other: &TypedBuffer<U>) -> Result<&mut Self, BufferError> {
        let src = other.as_slice();
        let dst = self.get(src.len())?;
        for (d, s) in dst.iter_mut().zip(src) {
            *d = T::from_bits(s.to_bits());
        }
        Ok(self.commit(src.len()))
    }

    pub fn copy<U: Element>(&mut self, other: &TypedBuffer<U>) -> Result<&mut Self, BufferError> {
        self.clear();
        self.append(other)
    }

    /// Pad with `fill` until the length is a multiple of `a`.
    ///
    /// `a` must be a power of two of at least 2, anything else is a no-op.
    pub fn align(&mut self, a: usize, fill: T) -> Result<&mut Self, BufferError> {
        if a < 2 || !a.is_power_of_two() {
            return Ok(self);
        }
        let rem = self.len() & (a - 1);
        if rem == 0 {
            return Ok(self);
        }
        let pad = a - rem;
        self.get(pad)?.fill(fill);
        Ok(self.commit(pad))
    }

    /// Drop the first `n` elements and move the rest to the front.
    pub fn consume(&mut self, n: usize) -> &mut Self {
        let len = self.len();
        let n = n.min(len);
        if n > 0 {
            self.raw.storage_mut().copy_within(n..len, 0);
            self.raw.set_len_unchecked(len - n);
        }
        self
    }
}

impl<T: Element> fmt::Debug for TypedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedBuffer")
            .field("len", &self.len())
            .field("cap", &self.capacity())
            .field("elem_size", &self.elem_size())
            .finish()
    }
}

impl<T: Element> TryFrom<&[T]> for TypedBuffer<T> {
    type Error = BufferError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        let mut b = Self::new();
        b.extend_from_slice(values)?;
        Ok(b)
    }
}

//! buffer/element.rs
//! Logical stream units and their explicit byte representation.

use std::fmt;

/// A fixed-width unit that can live in a [`TypedBuffer`](super::TypedBuffer).
///
/// Conversions between units of different widths go through the integer
/// value (`to_bits` / `from_bits`), which truncates or zero-extends.
/// Conversions to and from bytes are little-endian and never reinterpret
/// storage.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + 'static {
    /// Width in bytes.
    const WIDTH: usize;

    fn to_bits(self) -> u64;
    fn from_bits(bits: u64) -> Self;

    /// Write `WIDTH` little-endian bytes into `out[..WIDTH]`.
    fn write_le(self, out: &mut [u8]);

    /// Read a unit from `bytes[..WIDTH]`.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {$(
        impl Element for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();

            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $t
            }

            #[inline]
            fn write_le(self, out: &mut [u8]) {
                out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::WIDTH]);
                <$t>::from_le_bytes(raw)
            }
        }
    )*};
}

impl_element!(u8, u16, u32, u64);

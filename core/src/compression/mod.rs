//! compression/mod.rs
//! Codec contract, the element-width adapter and the reference codecs.
//!
//! Notes:
//! - Codecs work on typed buffers; the adapter stages partial units so a
//!   codec producing an odd byte count never splits a unit.
//! - An empty input resets a codec; `finish` flushes without new input.
//! - Registry resolves codec IDs and names to byte codecs.

pub mod adapter;
pub mod codecs;
pub mod constants;
pub mod registry;
pub mod types;

pub use adapter::*;
pub use codecs::*;
pub use constants::*;
pub use registry::*;
pub use types::*;

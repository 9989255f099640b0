//! compression/codecs/mod.rs
//! Reference codecs.
//!
//! - `deflate`: zlib via flate2, the default pair.
//! - `passthrough`: copies units unchanged.
//! - `fail`: always errors, fills the unused side of a one-way stream.

pub mod deflate;
pub mod fail;
pub mod passthrough;

pub use deflate::*;
pub use fail::*;
pub use passthrough::*;

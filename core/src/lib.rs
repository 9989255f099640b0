//! zstream-core
//!
//! Compressed data as an ordinary unit stream.
//! Growable buffers, codec adapters that carry partial units across calls,
//! and a pull/push stream adapter over `std::io` sources and sinks.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Building blocks
pub mod buffer;
pub mod compression;
pub mod telemetry;

// Stream layer
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::buffer::{Element, TypedBuffer};
    pub use crate::compression::{
        CompressionError, Compressor, Decompressor, DefaultCompressor, DefaultDecompressor,
        FailCompressor, FailDecompressor, NoCompressor, NoDecompressor,
    };
    pub use crate::config::{CodecConfig, Settings, StreamConfig};
    pub use crate::stream::{Sink, Source, ZReader, ZStreamBuf, ZWriter};
    pub use crate::types::StreamError;
}

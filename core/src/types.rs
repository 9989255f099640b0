//! types.rs
//! Unified stream error.

use std::io;

use crate::buffer::BufferError;
use crate::compression::CompressionError;
use crate::config::ConfigError;

/// Stream direction, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Read => f.write_str("read"),
            Direction::Write => f.write_str("write"),
        }
    }
}

/// Unified stream error covering I/O, codec, buffer and configuration.
/// - `From<T>` impls enable `?` across the layers.
/// - Exhaustion of the source is not an error; reads report it as `None`.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The source reported an error distinct from exhaustion.
    #[error("source failure: {0}")]
    SourceFailure(#[source] io::Error),

    #[error("sink failure: {0}")]
    SinkFailure(#[source] io::Error),

    /// The sink accepted fewer units than requested.
    #[error("short write: sink accepted {written} of {expected} units")]
    ShortWrite { expected: usize, written: usize },

    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Neither a source + decompressor nor a sink + compressor were given.
    #[error("stream has neither an active read side nor an active write side")]
    NoActiveSide,

    #[error("{0} side of the stream is not active")]
    Inactive(Direction),

    /// An earlier failure terminated this direction.
    #[error("{0} side of the stream failed earlier")]
    Failed(Direction),

    #[error("stream is closed")]
    Closed,
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::SourceFailure(inner) | StreamError::SinkFailure(inner) => inner,
            StreamError::ShortWrite { .. } => io::Error::new(io::ErrorKind::WriteZero, e),
            StreamError::Compression(CompressionError::ProtocolCorruption { .. }) => {
                io::Error::new(io::ErrorKind::InvalidData, e)
            }
            StreamError::Compression(CompressionError::CodecProcessFailed { .. }) => {
                io::Error::new(io::ErrorKind::InvalidData, e)
            }
            StreamError::Buffer(_) => io::Error::new(io::ErrorKind::OutOfMemory, e),
            StreamError::Inactive(_) => io::Error::new(io::ErrorKind::Unsupported, e),
            _ => io::Error::new(io::ErrorKind::Other, e),
        }
    }
}

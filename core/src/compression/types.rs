//! compression/types.rs
//! Codec contract, codec identifiers and compression errors.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;

use crate::buffer::{BufferError, Element, TypedBuffer};
use crate::compression::constants::codec_ids;

/// Codec identifiers.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CompressionCodec {
    None    = codec_ids::NONE,
    Deflate = codec_ids::DEFLATE,
    Fail    = codec_ids::FAIL,
}

impl CompressionCodec {
    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::None => "none",
            CompressionCodec::Deflate => "deflate",
            CompressionCodec::Fail => "fail",
        }
    }

    pub fn verify(raw: u16) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }
}

impl fmt::Display for CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionCodec {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "store" => Ok(CompressionCodec::None),
            "deflate" | "zlib" => Ok(CompressionCodec::Deflate),
            "fail" => Ok(CompressionCodec::Fail),
            other => Err(CompressionError::UnknownCodecName(other.to_string())),
        }
    }
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

fn codec_label(raw: &u16) -> String {
    enum_name_or_hex::<CompressionCodec>(*raw)
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompressionError {
    #[error("unsupported compression codec: {}", codec_label(.codec_id))]
    UnsupportedCodec { codec_id: u16 },

    #[error("unknown codec name: {0}")]
    UnknownCodecName(String),

    #[error("codec {codec} init failed: {msg}")]
    CodecInitFailed { codec: String, msg: String },

    #[error("codec {codec} process failed ({code}): {msg}")]
    CodecProcessFailed { codec: String, code: i32, msg: String },

    /// Input left over after a flush. Continuing would drop or duplicate data.
    #[error("codec {codec} protocol corruption: {leftover} staged bytes left after flush ({msg})")]
    ProtocolCorruption { codec: String, leftover: usize, msg: String },

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl CompressionError {
    /// Status code matching this error, zlib numbering.
    pub fn code(&self) -> i32 {
        use crate::compression::constants::status;
        match self {
            CompressionError::CodecProcessFailed { code, .. } => *code,
            CompressionError::ProtocolCorruption { .. } => status::DATA_ERROR,
            CompressionError::Buffer(_) => status::MEM_ERROR,
            _ => status::STREAM_ERROR,
        }
    }
}

/// Compressing half of the codec contract.
///
/// - `compress` appends data derived from `src` to `dest` and may keep
///   state between calls.
/// - An empty `src` resets all retained state; it is not a flush.
/// - `flush == true` emits everything retained. Afterwards no backlog
///   remains.
/// - Only successful calls may change retained state.
pub trait Compressor {
    /// Unit written by the stream user.
    type In: Element;
    /// Unit of the compressed data.
    type Out: Element;

    fn compress(
        &mut self,
        dest: &mut TypedBuffer<Self::Out>,
        src: &TypedBuffer<Self::In>,
        flush: bool,
    ) -> Result<(), CompressionError>;

    /// Flush with no further input.
    fn finish(&mut self, dest: &mut TypedBuffer<Self::Out>) -> Result<(), CompressionError>;

    fn name(&self) -> &'static str;
}

/// Decompressing half of the codec contract, the inverse of [`Compressor`].
pub trait Decompressor {
    /// Unit of the compressed data.
    type In: Element;
    /// Unit read by the stream user.
    type Out: Element;

    fn decompress(
        &mut self,
        dest: &mut TypedBuffer<Self::Out>,
        src: &TypedBuffer<Self::In>,
        flush: bool,
    ) -> Result<(), CompressionError>;

    /// Flush with no further input.
    fn finish(&mut self, dest: &mut TypedBuffer<Self::Out>) -> Result<(), CompressionError>;

    fn name(&self) -> &'static str;
}

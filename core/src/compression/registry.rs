//! compression/registry.rs
//! Codec registry and factory functions for byte streams.

use crate::compression::codecs::{
    DefaultCompressor, DefaultDecompressor, FailCompressor, FailDecompressor, NoCompressor,
    NoDecompressor,
};
use crate::compression::constants::DEFAULT_LEVEL_DEFLATE;
use crate::compression::types::{CompressionCodec, CompressionError, Compressor, Decompressor};
use crate::config::CodecConfig;

pub type ByteCompressor = Box<dyn Compressor<In = u8, Out = u8>>;
pub type ByteDecompressor = Box<dyn Decompressor<In = u8, Out = u8>>;

pub struct CodecInfo {
    pub name: &'static str,
    pub compresses: bool,
    pub default_level: u32,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    match CompressionCodec::verify(codec_id)? {
        CompressionCodec::None =>
            Ok(CodecInfo { name: "none", compresses: false, default_level: 0 }),
        CompressionCodec::Deflate =>
            Ok(CodecInfo { name: "deflate", compresses: true, default_level: DEFAULT_LEVEL_DEFLATE }),
        CompressionCodec::Fail =>
            Ok(CodecInfo { name: "fail", compresses: false, default_level: 0 }),
    }
}

pub fn create_compressor(codec: CompressionCodec, config: &CodecConfig) -> ByteCompressor {
    match codec {
        CompressionCodec::None => Box::new(NoCompressor::<u8>::new()),
        CompressionCodec::Deflate => Box::new(DefaultCompressor::<u8>::with_config(config)),
        CompressionCodec::Fail => Box::new(FailCompressor::<u8>::new()),
    }
}

pub fn create_decompressor(codec: CompressionCodec, config: &CodecConfig) -> ByteDecompressor {
    match codec {
        CompressionCodec::None => Box::new(NoDecompressor::<u8>::new()),
        CompressionCodec::Deflate => Box::new(DefaultDecompressor::<u8>::with_config(config)),
        CompressionCodec::Fail => Box::new(FailDecompressor::<u8>::new()),
    }
}

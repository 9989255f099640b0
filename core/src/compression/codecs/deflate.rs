//! codecs/deflate.rs
//! zlib streaming engines via flate2, and the default codec pair.
//!
//! Design notes:
//! - Both engines keep one flate2 stream alive across calls, so output of
//!   later calls may reference earlier input until a reset.
//! - A flush finishes the zlib stream; the encoder then starts a new one.
//! - The decoder continues with a new zlib stream when input follows a
//!   stream end, so concatenated members decode back to back.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::buffer::{Element, TypedBuffer};
use crate::compression::adapter::{CodecAdapter, DecodeEngine, EncodeEngine, Engine};
use crate::compression::constants::{status, DEFAULT_LEVEL_DEFLATE, ENGINE_OUT_CHUNK, MAX_LEVEL_DEFLATE};
use crate::compression::types::CompressionError;
use crate::config::CodecConfig;

const CODEC: &str = "deflate";

fn process_failed(code: i32, msg: impl Into<String>) -> CompressionError {
    CompressionError::CodecProcessFailed { codec: CODEC.into(), code, msg: msg.into() }
}

/// zlib compressor engine.
pub struct DeflateEngine {
    z: Compress,
    level: u32,
}

impl DeflateEngine {
    pub fn new(level: u32) -> Self {
        let level = level.min(MAX_LEVEL_DEFLATE);
        Self { z: Compress::new(Compression::new(level), true), level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for DeflateEngine {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_DEFLATE)
    }
}

impl Engine for DeflateEngine {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn process(
        &mut self,
        input: &[u8],
        out: &mut TypedBuffer<u8>,
        flush: bool,
    ) -> Result<usize, CompressionError> {
        let mode = if flush { FlushCompress::Finish } else { FlushCompress::None };
        let mut consumed = 0;
        loop {
            let rest = &input[consumed..];
            if rest.is_empty() && !flush {
                break;
            }
            let room = ENGINE_OUT_CHUNK.max(rest.len() / 2);
            let (in_before, out_before) = (self.z.total_in(), self.z.total_out());
            let area = out.get(room)?;
            let st = self
                .z
                .compress(rest, area, mode)
                .map_err(|e| process_failed(status::STREAM_ERROR, e.to_string()))?;
            let used = (self.z.total_in() - in_before) as usize;
            let produced = (self.z.total_out() - out_before) as usize;
            out.commit(produced);
            consumed += used;

            match st {
                Status::StreamEnd => {
                    self.z.reset();
                    break;
                }
                Status::Ok | Status::BufError => {
                    if used == 0 && produced == 0 {
                        break;
                    }
                }
            }
        }
        Ok(consumed)
    }

    fn reset(&mut self) {
        self.z.reset();
    }
}

impl EncodeEngine for DeflateEngine {}

/// zlib decompressor engine.
pub struct InflateEngine {
    z: Decompress,
    // a member has started and has not reached its end yet
    in_member: bool,
}

impl InflateEngine {
    pub fn new() -> Self {
        Self { z: Decompress::new(true), in_member: false }
    }
}

impl Default for InflateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for InflateEngine {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn process(
        &mut self,
        input: &[u8],
        out: &mut TypedBuffer<u8>,
        flush: bool,
    ) -> Result<usize, CompressionError> {
        let mut consumed = 0;
        loop {
            let rest = &input[consumed..];
            if rest.is_empty() && !flush {
                break;
            }
            let room = ENGINE_OUT_CHUNK.max(rest.len().saturating_mul(4));
            let (in_before, out_before) = (self.z.total_in(), self.z.total_out());
            let area = out.get(room)?;
            let st = self
                .z
                .decompress(rest, area, FlushDecompress::None)
                .map_err(|e| process_failed(status::DATA_ERROR, e.to_string()))?;
            let used = (self.z.total_in() - in_before) as usize;
            let produced = (self.z.total_out() - out_before) as usize;
            out.commit(produced);
            consumed += used;
            if used > 0 {
                self.in_member = true;
            }

            match st {
                Status::StreamEnd => {
                    self.z.reset(true);
                    self.in_member = false;
                    if consumed == input.len() {
                        break;
                    }
                }
                Status::Ok | Status::BufError => {
                    if used == 0 && produced == 0 {
                        break;
                    }
                }
            }
        }

        if flush && self.in_member && consumed == input.len() {
            return Err(CompressionError::ProtocolCorruption {
                codec: CODEC.into(),
                leftover: 0,
                msg: "compressed stream ends before its end marker".into(),
            });
        }
        Ok(consumed)
    }

    fn reset(&mut self) {
        self.z.reset(true);
        self.in_member = false;
    }
}

impl DecodeEngine for InflateEngine {}

/// zlib compressor for stream units `I`, producing compressed units `O`.
pub type DefaultCompressor<I, O = u8> = CodecAdapter<DeflateEngine, I, O>;

/// zlib decompressor producing stream units `O` from compressed units `I`.
pub type DefaultDecompressor<O, I = u8> = CodecAdapter<InflateEngine, I, O>;

impl<I: Element, O: Element> CodecAdapter<DeflateEngine, I, O> {
    pub fn new() -> Self {
        Self::with_default_batch(DeflateEngine::default())
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self::from_engine(DeflateEngine::new(config.level), config.batch_size)
    }
}

impl<I: Element, O: Element> Default for CodecAdapter<DeflateEngine, I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Element, O: Element> CodecAdapter<InflateEngine, I, O> {
    pub fn new() -> Self {
        Self::with_default_batch(InflateEngine::new())
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self::from_engine(InflateEngine::new(), config.batch_size)
    }
}

impl<I: Element, O: Element> Default for CodecAdapter<InflateEngine, I, O> {
    fn default() -> Self {
        Self::new()
    }
}

//! compression/adapter.rs
//! Element-width adapter between a byte engine and typed stream units.
//!
//! Design notes:
//! - Engines work on bytes. Stream units may be wider, so one engine
//!   round can consume or produce a byte count that is not a whole number
//!   of units.
//! - Incoming units are staged as little-endian bytes in `U`; engine
//!   output lands in `C`, and only whole units leave `C`.
//! - The engine runs on flush or once `U` reaches the batch size.
//! - An empty input is the reset signal and is forwarded to the engine.
//! - An engine cannot be rewound, so a failed round poisons the adapter:
//!   every call returns that error until the next reset.

use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::buffer::{BufferError, Element, TypedBuffer};
use crate::compression::constants::status;
use crate::compression::types::{CompressionError, Compressor, Decompressor};
use crate::constants::DEFAULT_BATCH_SIZE;

/// A byte-oriented codec engine.
pub trait Engine {
    fn name(&self) -> &'static str;

    /// Feed `input`, append produced bytes to `out`, return bytes consumed.
    ///
    /// With `flush` the engine must emit everything it retains.
    fn process(
        &mut self,
        input: &[u8],
        out: &mut TypedBuffer<u8>,
        flush: bool,
    ) -> Result<usize, CompressionError>;

    /// Forget all history and start a fresh stream.
    fn reset(&mut self);
}

/// Engines producing compressed data.
pub trait EncodeEngine: Engine {}

/// Engines producing decompressed data.
pub trait DecodeEngine: Engine {}

/// Codec state: engine, staging buffers and last status.
pub struct CodecAdapter<E, I, O> {
    engine: E,
    /// `U`: bytes handed in but not yet consumed by the engine.
    pending_in: TypedBuffer<u8>,
    /// `C`: engine output not yet emitted as whole units.
    pending_out: TypedBuffer<u8>,
    batch_size: usize,
    last_status: i32,
    last_message: Option<String>,
    // zero bytes added by the last flush to complete a unit
    last_padding: usize,
    poisoned: Option<CompressionError>,
    _units: PhantomData<fn(I) -> O>,
}

impl<E: Engine, I: Element, O: Element> CodecAdapter<E, I, O> {
    pub fn from_engine(engine: E, batch_size: usize) -> Self {
        Self {
            engine,
            pending_in: TypedBuffer::new(),
            pending_out: TypedBuffer::new(),
            batch_size: batch_size.max(1),
            last_status: status::OK,
            last_message: None,
            last_padding: 0,
            poisoned: None,
            _units: PhantomData,
        }
    }

    pub fn with_default_batch(engine: E) -> Self {
        Self::from_engine(engine, DEFAULT_BATCH_SIZE)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Status code of the last call (0 ok, 1 stream end, negative error).
    pub fn status(&self) -> i32 {
        self.last_status
    }

    /// Diagnostic of the last failed call.
    pub fn message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Bytes staged for the engine.
    pub fn pending_input(&self) -> usize {
        self.pending_in.len()
    }

    /// Bytes produced but short of a whole output unit.
    pub fn pending_output(&self) -> usize {
        self.pending_out.len()
    }

    /// Zero bytes the last flush appended to complete a trailing unit.
    pub fn padding(&self) -> usize {
        self.last_padding
    }

    /// Failed and waiting for a reset.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub fn reset(&mut self) {
        debug!(codec = self.engine.name(), "codec reset");
        self.engine.reset();
        self.pending_in.clear();
        self.pending_out.clear();
        self.last_status = status::OK;
        self.last_message = None;
        self.last_padding = 0;
        self.poisoned = None;
    }

    fn check_poisoned(&self) -> Result<(), CompressionError> {
        match &self.poisoned {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn run(
        &mut self,
        dest: &mut TypedBuffer<O>,
        src: &TypedBuffer<I>,
        flush: bool,
    ) -> Result<(), CompressionError> {
        if src.is_empty() {
            self.reset();
            return Ok(());
        }
        self.check_poisoned()?;
        let mark = self.pending_in.len();
        stage_units(&mut self.pending_in, src.as_slice())?;
        if !flush && self.pending_in.len() < self.batch_size {
            trace!(
                codec = self.engine.name(),
                staged = self.pending_in.len(),
                "batching input"
            );
            return Ok(());
        }
        self.drive(dest, flush, mark)
    }

    fn drive(
        &mut self,
        dest: &mut TypedBuffer<O>,
        flush: bool,
        mark: usize,
    ) -> Result<(), CompressionError> {
        let out_mark = self.pending_out.len();
        let consumed = match self
            .engine
            .process(self.pending_in.as_slice(), &mut self.pending_out, flush)
        {
            Ok(n) => n,
            Err(e) => {
                // failed calls leave both staging buffers as they were
                self.pending_in.set_len(mark);
                return Err(self.poison(e, out_mark));
            }
        };
        trace!(
            codec = self.engine.name(),
            staged = self.pending_in.len(),
            consumed,
            produced = self.pending_out.len(),
            flush,
            "engine round"
        );
        self.pending_in.consume(consumed);

        if flush && !self.pending_in.is_empty() {
            let err = CompressionError::ProtocolCorruption {
                codec: self.engine.name().to_string(),
                leftover: self.pending_in.len(),
                msg: "engine did not consume all input on flush".into(),
            };
            return Err(self.poison(err, out_mark));
        }

        let padding = match emit_units(&mut self.pending_out, dest, flush) {
            Ok(n) => n,
            Err(e) => return Err(self.poison(e.into(), out_mark)),
        };
        if padding > 0 {
            debug!(codec = self.engine.name(), padding, "trailing partial unit zero-padded");
        }
        self.last_padding = padding;
        self.last_status = if flush { status::STREAM_END } else { status::OK };
        self.last_message = None;
        Ok(())
    }

    fn flush_out(&mut self, dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        debug!(
            codec = self.engine.name(),
            staged = self.pending_in.len(),
            "codec finish"
        );
        self.check_poisoned()?;
        let mark = self.pending_in.len();
        self.drive(dest, true, mark)
    }

    /// Drop output of the failed round and keep `err` until a reset.
    fn poison(&mut self, err: CompressionError, out_mark: usize) -> CompressionError {
        warn!(codec = self.engine.name(), error = %err, "codec call failed");
        self.pending_out.set_len(out_mark);
        self.last_status = err.code();
        self.last_message = Some(err.to_string());
        self.poisoned = Some(err.clone());
        err
    }
}

/// Append `units` to `bytes` as little-endian bytes.
fn stage_units<I: Element>(bytes: &mut TypedBuffer<u8>, units: &[I]) -> Result<(), BufferError> {
    let n = units.len() * I::WIDTH;
    let area = bytes.get(n)?;
    for (chunk, unit) in area.chunks_exact_mut(I::WIDTH).zip(units) {
        unit.write_le(chunk);
    }
    bytes.commit(n);
    Ok(())
}

/// Move whole units from `bytes` to `dest`, keeping the remainder.
///
/// On flush a remainder is zero-padded to one full unit and emitted.
/// Returns the number of padding bytes.
fn emit_units<O: Element>(
    bytes: &mut TypedBuffer<u8>,
    dest: &mut TypedBuffer<O>,
    flush: bool,
) -> Result<usize, BufferError> {
    let mut padding = 0;
    if flush {
        let before = bytes.len();
        bytes.align(O::WIDTH, 0)?;
        padding = bytes.len() - before;
    }
    let whole = bytes.len() / O::WIDTH;
    if whole == 0 {
        return Ok(padding);
    }
    let area = dest.get(whole)?;
    for (slot, chunk) in area.iter_mut().zip(bytes.as_slice().chunks_exact(O::WIDTH)) {
        *slot = O::read_le(chunk);
    }
    dest.commit(whole);
    bytes.consume(whole * O::WIDTH);
    Ok(padding)
}

impl<E: EncodeEngine, I: Element, O: Element> Compressor for CodecAdapter<E, I, O> {
    type In = I;
    type Out = O;

    fn compress(
        &mut self,
        dest: &mut TypedBuffer<O>,
        src: &TypedBuffer<I>,
        flush: bool,
    ) -> Result<(), CompressionError> {
        self.run(dest, src, flush)
    }

    fn finish(&mut self, dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        self.flush_out(dest)
    }

    fn name(&self) -> &'static str {
        self.engine.name()
    }
}

impl<E: DecodeEngine, I: Element, O: Element> Decompressor for CodecAdapter<E, I, O> {
    type In = I;
    type Out = O;

    fn decompress(
        &mut self,
        dest: &mut TypedBuffer<O>,
        src: &TypedBuffer<I>,
        flush: bool,
    ) -> Result<(), CompressionError> {
        self.run(dest, src, flush)
    }

    fn finish(&mut self, dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        self.flush_out(dest)
    }

    fn name(&self) -> &'static str {
        self.engine.name()
    }
}

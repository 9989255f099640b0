//! stream/buf.rs
//! The stream adapter: drives codecs between a source/sink and the caller.
//!
//! Read direction:  source → `zibuf` → decompressor → `ibuf` → caller
//! Write direction: caller → `obuf` → compressor → `zobuf` → sink
//!
//! Direction state is buffer occupancy plus an exhausted flag and a failed
//! flag. Codec, sink and short-write failures end their direction; source
//! errors do not, the next read retries the source.

use std::io;

use tracing::{debug, error, warn};

use crate::buffer::{Element, TypedBuffer};
use crate::compression::{Compressor, Decompressor};
use crate::config::StreamConfig;
use crate::stream::io::{Sink, Source};
use crate::telemetry::StreamCounters;
use crate::types::{Direction, StreamError};

/// Stream adapter over borrowed source, sink and codecs.
///
/// The read side is active when both a source and a decompressor are
/// present, the write side when both a sink and a compressor are. If the
/// write side is still open on drop it is closed, and a failure is logged;
/// call [`close`](Self::close) to observe it instead.
pub struct ZStreamBuf<'a, T, S, D, K, C>
where
    T: Element,
    S: Source + ?Sized,
    D: Decompressor<In = S::Unit, Out = T> + ?Sized,
    K: Sink + ?Sized,
    C: Compressor<In = T, Out = K::Unit> + ?Sized,
{
    source: Option<&'a mut S>,
    sink: Option<&'a mut K>,
    decompressor: Option<&'a mut D>,
    compressor: Option<&'a mut C>,
    // read window and cursor
    ibuf: TypedBuffer<T>,
    ipos: usize,
    // compressed input and how much of it the decompressor has taken
    zibuf: TypedBuffer<S::Unit>,
    zibuf_pos: usize,
    // write window
    obuf: TypedBuffer<T>,
    // compressed output waiting for the sink
    zobuf: TypedBuffer<K::Unit>,
    config: StreamConfig,
    counters: StreamCounters,
    source_done: bool,
    read_failed: bool,
    write_failed: bool,
    closed: bool,
}

impl<'a, T, S, D, K, C> ZStreamBuf<'a, T, S, D, K, C>
where
    T: Element,
    S: Source + ?Sized,
    D: Decompressor<In = S::Unit, Out = T> + ?Sized,
    K: Sink + ?Sized,
    C: Compressor<In = T, Out = K::Unit> + ?Sized,
{
    pub fn new(
        source: Option<&'a mut S>,
        sink: Option<&'a mut K>,
        decompressor: Option<&'a mut D>,
        compressor: Option<&'a mut C>,
        config: StreamConfig,
    ) -> Result<Self, StreamError> {
        config.validate()?;
        let stream = Self::from_parts(source, sink, decompressor, compressor, config);
        if !stream.is_read_active() && !stream.is_write_active() {
            return Err(StreamError::NoActiveSide);
        }
        Ok(stream)
    }

    pub(crate) fn from_parts(
        source: Option<&'a mut S>,
        sink: Option<&'a mut K>,
        decompressor: Option<&'a mut D>,
        compressor: Option<&'a mut C>,
        config: StreamConfig,
    ) -> Self {
        Self {
            source,
            sink,
            decompressor,
            compressor,
            ibuf: TypedBuffer::new(),
            ipos: 0,
            zibuf: TypedBuffer::new(),
            zibuf_pos: 0,
            obuf: TypedBuffer::new(),
            zobuf: TypedBuffer::new(),
            config,
            counters: StreamCounters::default(),
            source_done: false,
            read_failed: false,
            write_failed: false,
            closed: false,
        }
    }

    pub fn is_read_active(&self) -> bool {
        self.source.is_some() && self.decompressor.is_some()
    }

    pub fn is_write_active(&self) -> bool {
        self.sink.is_some() && self.compressor.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    /// Decoded units not yet handed to the caller.
    pub fn available(&self) -> usize {
        self.ibuf.len() - self.ipos
    }

    // ---------------------------------------------------------------------
    // Read direction
    // ---------------------------------------------------------------------

    /// Next unit without consuming it; `None` at end of stream.
    pub fn peek(&mut self) -> Result<Option<T>, StreamError> {
        if self.ipos < self.ibuf.len() {
            return Ok(Some(self.ibuf.as_slice()[self.ipos]));
        }
        self.underflow()
    }

    /// Next unit; `None` at end of stream.
    pub fn get(&mut self) -> Result<Option<T>, StreamError> {
        let unit = self.peek()?;
        if unit.is_some() {
            self.ipos += 1;
        }
        Ok(unit)
    }

    /// Copy decoded units into `out`.
    ///
    /// Decodes more only when nothing is buffered, so the call blocks at
    /// most once. Returns 0 only at end of stream or for an empty `out`.
    pub fn read_units(&mut self, out: &mut [T]) -> Result<usize, StreamError> {
        if out.is_empty() {
            return Ok(0);
        }
        if self.ipos >= self.ibuf.len() && self.underflow()?.is_none() {
            return Ok(0);
        }
        let window = &self.ibuf.as_slice()[self.ipos..];
        let n = window.len().min(out.len());
        out[..n].copy_from_slice(&window[..n]);
        self.ipos += n;
        Ok(n)
    }

    /// Read until end of stream, appending to `out`.
    pub fn read_to_end_units(&mut self, out: &mut Vec<T>) -> Result<usize, StreamError> {
        let start = out.len();
        while self.peek()?.is_some() {
            out.extend_from_slice(&self.ibuf.as_slice()[self.ipos..]);
            self.ipos = self.ibuf.len();
        }
        Ok(out.len() - start)
    }

    /// Refill the read window. Returns its first unit, `None` once the
    /// source is exhausted and nothing more decodes.
    fn underflow(&mut self) -> Result<Option<T>, StreamError> {
        if !self.is_read_active() {
            return Err(StreamError::Inactive(Direction::Read));
        }
        if self.read_failed {
            return Err(StreamError::Failed(Direction::Read));
        }
        loop {
            if self.ipos < self.ibuf.len() {
                return Ok(Some(self.ibuf.as_slice()[self.ipos]));
            }
            if self.source_done {
                return Ok(None);
            }

            if self.zibuf_pos > 0 {
                self.zibuf.consume(self.zibuf_pos);
                self.zibuf_pos = 0;
            }

            let pulled = self.pull()?;
            let flush = pulled == 0;
            if flush {
                debug!(staged = self.zibuf.len(), "source exhausted, flushing decompressor");
                self.source_done = true;
            }

            self.ibuf.clear();
            self.ipos = 0;
            let Some(d) = self.decompressor.as_deref_mut() else {
                return Err(StreamError::Inactive(Direction::Read));
            };
            // an empty src would reset the codec, so end of data with
            // nothing staged goes through `finish`
            let result = if !self.zibuf.is_empty() {
                d.decompress(&mut self.ibuf, &self.zibuf, flush)
            } else if flush {
                d.finish(&mut self.ibuf)
            } else {
                Ok(())
            };
            if let Err(e) = result {
                warn!(codec = d.name(), error = %e, "decompression failed");
                self.read_failed = true;
                self.ibuf.clear();
                return Err(e.into());
            }
            // the codec stages whatever it did not consume itself
            self.zibuf_pos = self.zibuf.len();
            self.counters.record_decode(self.ibuf.as_slice(), flush);
        }
    }

    /// Pull one chunk from the source into `zibuf`.
    fn pull(&mut self) -> Result<usize, StreamError> {
        let want = self.config.read_chunk;
        let Some(source) = self.source.as_deref_mut() else {
            return Err(StreamError::Inactive(Direction::Read));
        };
        let area = self.zibuf.get(want)?;
        let n = loop {
            match source.pull(area) {
                Ok(n) => break n.min(want),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "source read failed");
                    return Err(StreamError::SourceFailure(e));
                }
            }
        };
        self.zibuf.commit(n);
        self.counters.record_pull(n);
        Ok(n)
    }

    // ---------------------------------------------------------------------
    // Write direction
    // ---------------------------------------------------------------------

    pub fn put(&mut self, unit: T) -> Result<(), StreamError> {
        self.check_writable()?;
        if self.obuf.len() < self.config.window_size {
            self.obuf.push(unit)?;
            Ok(())
        } else {
            self.overflow(Some(unit), false)
        }
    }

    pub fn write_units(&mut self, units: &[T]) -> Result<usize, StreamError> {
        self.check_writable()?;
        let mut rest = units;
        while let Some((&first, tail)) = rest.split_first() {
            let room = self.config.window_size.saturating_sub(self.obuf.len());
            if room == 0 {
                self.overflow(Some(first), false)?;
                rest = tail;
                continue;
            }
            let take = room.min(rest.len());
            self.obuf.extend_from_slice(&rest[..take])?;
            rest = &rest[take..];
        }
        Ok(units.len())
    }

    /// Push the window through the compressor and flush the sink.
    ///
    /// The compressed stream is not ended; the codec may still hold data
    /// back until [`close`](Self::close).
    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.check_writable()?;
        self.overflow(None, false)?;
        self.flush_sink()
    }

    /// End the compressed stream and flush the sink. Idempotent.
    pub fn close(&mut self) -> Result<(), StreamError> {
        if self.closed || !self.is_write_active() {
            self.closed = true;
            return Ok(());
        }
        self.closed = true;
        if self.write_failed {
            return Err(StreamError::Failed(Direction::Write));
        }
        debug!(window = self.obuf.len(), "closing compressed stream");
        self.overflow(None, true)?;
        self.flush_sink()
    }

    fn check_writable(&self) -> Result<(), StreamError> {
        if !self.is_write_active() {
            return Err(StreamError::Inactive(Direction::Write));
        }
        if self.closed {
            return Err(StreamError::Closed);
        }
        if self.write_failed {
            return Err(StreamError::Failed(Direction::Write));
        }
        Ok(())
    }

    /// Hand the window (plus `pending`) to the compressor and the result
    /// to the sink. `eos` ends the compressed stream.
    fn overflow(&mut self, pending: Option<T>, eos: bool) -> Result<(), StreamError> {
        if let Some(unit) = pending {
            self.obuf.push(unit)?;
        }
        let Some(c) = self.compressor.as_deref_mut() else {
            return Err(StreamError::Inactive(Direction::Write));
        };
        let called = !self.obuf.is_empty() || eos;
        // an empty src would reset the codec, so a final call with an
        // empty window goes through `finish`
        let result = if !self.obuf.is_empty() {
            c.compress(&mut self.zobuf, &self.obuf, eos)
        } else if eos {
            c.finish(&mut self.zobuf)
        } else {
            Ok(())
        };
        if let Err(e) = result {
            warn!(codec = c.name(), error = %e, "compression failed");
            self.write_failed = true;
            self.obuf.clear();
            return Err(e.into());
        }
        if called {
            self.counters.record_encode(self.obuf.as_slice(), eos);
        }
        self.obuf.clear().reserve(self.config.window_size)?;
        self.push_out()
    }

    /// Write all of `zobuf` to the sink in one call.
    fn push_out(&mut self) -> Result<(), StreamError> {
        if self.zobuf.is_empty() {
            return Ok(());
        }
        let Some(sink) = self.sink.as_deref_mut() else {
            return Err(StreamError::Inactive(Direction::Write));
        };
        let expected = self.zobuf.len();
        let written = match sink.push(self.zobuf.as_slice()) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "sink write failed");
                self.write_failed = true;
                return Err(StreamError::SinkFailure(e));
            }
        };
        self.counters.record_push(written);
        if written < expected {
            warn!(expected, written, "short write");
            self.write_failed = true;
            return Err(StreamError::ShortWrite { expected, written });
        }
        self.zobuf.clear();
        Ok(())
    }

    fn flush_sink(&mut self) -> Result<(), StreamError> {
        let Some(sink) = self.sink.as_deref_mut() else {
            return Err(StreamError::Inactive(Direction::Write));
        };
        sink.flush_sink().map_err(|e| {
            self.write_failed = true;
            StreamError::SinkFailure(e)
        })
    }
}

impl<'a, T, S, D, K, C> Drop for ZStreamBuf<'a, T, S, D, K, C>
where
    T: Element,
    S: Source + ?Sized,
    D: Decompressor<In = S::Unit, Out = T> + ?Sized,
    K: Sink + ?Sized,
    C: Compressor<In = T, Out = K::Unit> + ?Sized,
{
    fn drop(&mut self) {
        if self.is_write_active() && !self.closed {
            if let Err(e) = self.close() {
                error!(error = %e, "closing compressed stream on drop failed");
            }
        }
    }
}

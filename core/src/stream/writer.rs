//! stream/writer.rs
//! Write-only stream adapter.

use std::io::{self, Write};

use crate::compression::{Compressor, FailDecompressor};
use crate::config::StreamConfig;
use crate::stream::buf::ZStreamBuf;
use crate::stream::io::Sink;
use crate::telemetry::StreamCounters;
use crate::types::StreamError;

/// Compressing writer over a borrowed sink.
///
/// Dropping the writer closes it; call [`close`](Self::close) to see
/// errors from the final flush.
pub struct ZWriter<'a, K, C>
where
    K: Sink + ?Sized,
    C: Compressor<Out = K::Unit> + ?Sized,
{
    inner: ZStreamBuf<'a, C::In, io::Empty, FailDecompressor<C::In>, K, C>,
}

impl<'a, K, C> ZWriter<'a, K, C>
where
    K: Sink + ?Sized,
    C: Compressor<Out = K::Unit> + ?Sized,
{
    pub fn new(sink: &'a mut K, compressor: &'a mut C) -> Self {
        let inner = ZStreamBuf::from_parts(
            None,
            Some(sink),
            None,
            Some(compressor),
            StreamConfig::default(),
        );
        Self { inner }
    }

    pub fn with_config(
        sink: &'a mut K,
        compressor: &'a mut C,
        config: StreamConfig,
    ) -> Result<Self, StreamError> {
        let inner = ZStreamBuf::new(None, Some(sink), None, Some(compressor), config)?;
        Ok(Self { inner })
    }

    pub fn put(&mut self, unit: C::In) -> Result<(), StreamError> {
        self.inner.put(unit)
    }

    pub fn write_units(&mut self, units: &[C::In]) -> Result<usize, StreamError> {
        self.inner.write_units(units)
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.inner.flush()
    }

    pub fn close(&mut self) -> Result<(), StreamError> {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn counters(&self) -> &StreamCounters {
        self.inner.counters()
    }

    /// Run `f` on this writer, for chaining.
    pub fn apply<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        f(self)
    }
}

impl<'a, K, C> Write for ZWriter<'a, K, C>
where
    K: Sink + ?Sized,
    C: Compressor<In = u8, Out = K::Unit> + ?Sized,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.inner.write_units(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.inner.flush()?)
    }
}

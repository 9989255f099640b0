//! stream/reader.rs
//! Read-only stream adapter.

use std::io::{self, Read};

use crate::compression::{Decompressor, FailCompressor};
use crate::config::StreamConfig;
use crate::stream::buf::ZStreamBuf;
use crate::stream::io::Source;
use crate::telemetry::StreamCounters;
use crate::types::StreamError;

/// Decompressing reader over a borrowed source.
///
/// ```no_run
/// use std::io::Read;
/// use zstream_core::prelude::*;
///
/// let compressed: Vec<u8> = std::fs::read("data.z")?;
/// let mut src = compressed.as_slice();
/// let mut codec = DefaultDecompressor::<u8>::new();
/// let mut text = String::new();
/// ZReader::new(&mut src, &mut codec).read_to_string(&mut text)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ZReader<'a, S, D>
where
    S: Source + ?Sized,
    D: Decompressor<In = S::Unit> + ?Sized,
{
    // the write side is never active; its types only satisfy the bounds
    inner: ZStreamBuf<'a, D::Out, S, D, io::Sink, FailCompressor<D::Out>>,
}

impl<'a, S, D> ZReader<'a, S, D>
where
    S: Source + ?Sized,
    D: Decompressor<In = S::Unit> + ?Sized,
{
    pub fn new(source: &'a mut S, decompressor: &'a mut D) -> Self {
        let inner = ZStreamBuf::from_parts(
            Some(source),
            None,
            Some(decompressor),
            None,
            StreamConfig::default(),
        );
        Self { inner }
    }

    pub fn with_config(
        source: &'a mut S,
        decompressor: &'a mut D,
        config: StreamConfig,
    ) -> Result<Self, StreamError> {
        let inner = ZStreamBuf::new(Some(source), None, Some(decompressor), None, config)?;
        Ok(Self { inner })
    }

    pub fn get(&mut self) -> Result<Option<D::Out>, StreamError> {
        self.inner.get()
    }

    pub fn peek(&mut self) -> Result<Option<D::Out>, StreamError> {
        self.inner.peek()
    }

    pub fn read_units(&mut self, out: &mut [D::Out]) -> Result<usize, StreamError> {
        self.inner.read_units(out)
    }

    pub fn read_to_end_units(&mut self, out: &mut Vec<D::Out>) -> Result<usize, StreamError> {
        self.inner.read_to_end_units(out)
    }

    pub fn counters(&self) -> &StreamCounters {
        self.inner.counters()
    }

    /// Run `f` on this reader, for chaining.
    pub fn apply<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        f(self)
    }
}

impl<'a, S, D> Read for ZReader<'a, S, D>
where
    S: Source + ?Sized,
    D: Decompressor<In = S::Unit, Out = u8> + ?Sized,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.inner.read_units(buf)?)
    }
}

//! stream/io.rs
//! Source and sink abstractions the stream adapter pulls from and pushes to.
//!
//! Every `std::io::Read` is a byte source and every `std::io::Write` a
//! byte sink, so files, sockets, slices and vectors plug in directly.

use std::io::{self, Read, Write};

use crate::buffer::Element;

/// Blocking supplier of compressed units.
pub trait Source {
    type Unit: Element;

    /// Fill the front of `buf`, returning how many units were written.
    ///
    /// `Ok(0)` means the source is exhausted. An error is not exhaustion;
    /// a later call may succeed.
    fn pull(&mut self, buf: &mut [Self::Unit]) -> io::Result<usize>;
}

/// Blocking consumer of compressed units.
pub trait Sink {
    type Unit: Element;

    /// Hand over `units`, returning how many were accepted.
    ///
    /// Fewer than `units.len()` is a short write.
    fn push(&mut self, units: &[Self::Unit]) -> io::Result<usize>;

    fn flush_sink(&mut self) -> io::Result<()>;
}

impl<R: Read + ?Sized> Source for R {
    type Unit = u8;

    fn pull(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

impl<W: Write + ?Sized> Sink for W {
    type Unit = u8;

    fn push(&mut self, units: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < units.len() {
            match self.write(&units[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(written)
    }

    fn flush_sink(&mut self) -> io::Result<()> {
        self.flush()
    }
}

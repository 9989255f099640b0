//! codecs/passthrough.rs
//! Pass-through codec: units are copied, converted by value.

use std::marker::PhantomData;

use crate::buffer::{Element, TypedBuffer};
use crate::compression::types::{CompressionError, Compressor, Decompressor};

pub struct NoCompressor<I, O = I> {
    _units: PhantomData<fn(I) -> O>,
}

pub struct NoDecompressor<O, I = O> {
    _units: PhantomData<fn(I) -> O>,
}

impl<I, O> NoCompressor<I, O> {
    pub fn new() -> Self {
        Self { _units: PhantomData }
    }
}

impl<I, O> Default for NoCompressor<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, I> NoDecompressor<O, I> {
    pub fn new() -> Self {
        Self { _units: PhantomData }
    }
}

impl<O, I> Default for NoDecompressor<O, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Element, O: Element> Compressor for NoCompressor<I, O> {
    type In = I;
    type Out = O;

    fn compress(
        &mut self,
        dest: &mut TypedBuffer<O>,
        src: &TypedBuffer<I>,
        _flush: bool,
    ) -> Result<(), CompressionError> {
        dest.append(src)?;
        Ok(())
    }

    fn finish(&mut self, _dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

impl<O: Element, I: Element> Decompressor for NoDecompressor<O, I> {
    type In = I;
    type Out = O;

    fn decompress(
        &mut self,
        dest: &mut TypedBuffer<O>,
        src: &TypedBuffer<I>,
        _flush: bool,
    ) -> Result<(), CompressionError> {
        dest.append(src)?;
        Ok(())
    }

    fn finish(&mut self, _dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

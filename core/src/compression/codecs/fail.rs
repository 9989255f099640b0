//! codecs/fail.rs
//! Codec that always fails; the inert half of a one-directional stream.

use std::marker::PhantomData;

use crate::buffer::{Element, TypedBuffer};
use crate::compression::constants::status;
use crate::compression::types::{CompressionError, Compressor, Decompressor};

fn always_fails() -> CompressionError {
    CompressionError::CodecProcessFailed {
        codec: "fail".into(),
        code: status::ERRNO,
        msg: "this codec always fails".into(),
    }
}

pub struct FailCompressor<I, O = u8> {
    _units: PhantomData<fn(I) -> O>,
}

pub struct FailDecompressor<O, I = u8> {
    _units: PhantomData<fn(I) -> O>,
}

impl<I, O> FailCompressor<I, O> {
    pub fn new() -> Self {
        Self { _units: PhantomData }
    }
}

impl<I, O> Default for FailCompressor<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, I> FailDecompressor<O, I> {
    pub fn new() -> Self {
        Self { _units: PhantomData }
    }
}

impl<O, I> Default for FailDecompressor<O, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Element, O: Element> Compressor for FailCompressor<I, O> {
    type In = I;
    type Out = O;

    fn compress(
        &mut self,
        _dest: &mut TypedBuffer<O>,
        _src: &TypedBuffer<I>,
        _flush: bool,
    ) -> Result<(), CompressionError> {
        Err(always_fails())
    }

    fn finish(&mut self, _dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        Err(always_fails())
    }

    fn name(&self) -> &'static str {
        "fail"
    }
}

impl<O: Element, I: Element> Decompressor for FailDecompressor<O, I> {
    type In = I;
    type Out = O;

    fn decompress(
        &mut self,
        _dest: &mut TypedBuffer<O>,
        _src: &TypedBuffer<I>,
        _flush: bool,
    ) -> Result<(), CompressionError> {
        Err(always_fails())
    }

    fn finish(&mut self, _dest: &mut TypedBuffer<O>) -> Result<(), CompressionError> {
        Err(always_fails())
    }

    fn name(&self) -> &'static str {
        "fail"
    }
}

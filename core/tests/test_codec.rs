#[cfg(test)]
mod tests {
    use zstream_core::buffer::TypedBuffer;
    use zstream_core::compression::{
        codec_ids, create_compressor, create_decompressor, resolve, status, CodecAdapter,
        CompressionCodec, CompressionError, Compressor, Decompressor, DefaultCompressor,
        DefaultDecompressor, EncodeEngine, Engine, FailCompressor, FailDecompressor,
        NoCompressor, NoDecompressor,
    };
    use zstream_core::compression::InflateEngine;
    use zstream_core::config::CodecConfig;

    fn bytes(data: &[u8]) -> TypedBuffer<u8> {
        TypedBuffer::try_from(data).expect("buffer from slice")
    }

    fn deflate_all(data: &[u8]) -> Vec<u8> {
        let mut c = DefaultCompressor::<u8>::new();
        let mut out = TypedBuffer::new();
        c.compress(&mut out, &bytes(data), true).expect("compress");
        out.to_vec()
    }

    fn inflate_all(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut d = DefaultDecompressor::<u8>::new();
        let mut out = TypedBuffer::new();
        if data.is_empty() {
            d.finish(&mut out)?;
        } else {
            d.decompress(&mut out, &bytes(data), true)?;
        }
        Ok(out.to_vec())
    }

    /// Consumes half of what it is given, copying it through.
    struct HalfEngine;

    impl Engine for HalfEngine {
        fn name(&self) -> &'static str {
            "half"
        }

        fn process(
            &mut self,
            input: &[u8],
            out: &mut TypedBuffer<u8>,
            _flush: bool,
        ) -> Result<usize, CompressionError> {
            let n = input.len() / 2;
            out.extend_from_slice(&input[..n])?;
            Ok(n)
        }

        fn reset(&mut self) {}
    }

    impl EncodeEngine for HalfEngine {}

    /// Fails its first call, then copies bytes through.
    struct FlakyEngine {
        failed: bool,
    }

    impl Engine for FlakyEngine {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn process(
            &mut self,
            input: &[u8],
            out: &mut TypedBuffer<u8>,
            _flush: bool,
        ) -> Result<usize, CompressionError> {
            if !self.failed {
                self.failed = true;
                return Err(CompressionError::CodecProcessFailed {
                    codec: "flaky".into(),
                    code: status::BUF_ERROR,
                    msg: "first call fails".into(),
                });
            }
            out.extend_from_slice(input)?;
            Ok(input.len())
        }

        fn reset(&mut self) {}
    }

    impl EncodeEngine for FlakyEngine {}

    // ---------------------------------------------------------------------
    // # ✅ 1. Deflate round trips
    // ---------------------------------------------------------------------
    #[test]
    fn deflate_roundtrip_short_text() {
        let z = deflate_all(b"abcdef");
        assert!(!z.is_empty());
        assert_eq!(z[0], 0x78, "zlib header");
        assert_eq!(inflate_all(&z).expect("inflate"), b"abcdef");
    }

    #[test]
    fn empty_stream_roundtrip() {
        let mut c = DefaultCompressor::<u8>::new();
        let mut z = TypedBuffer::new();
        c.finish(&mut z).expect("finish");
        assert!(!z.is_empty(), "an empty stream still has header and trailer");
        assert!(inflate_all(z.as_slice()).expect("inflate").is_empty());
        assert!(inflate_all(&[]).expect("inflate nothing").is_empty());
    }

    #[test]
    fn repetitive_data_shrinks() {
        let data = vec![b'z'; 50_000];
        let z = deflate_all(&data);
        assert!(z.len() < 1_000, "compressed {} bytes", z.len());
        assert_eq!(inflate_all(&z).expect("inflate"), data);
    }

    #[test]
    fn level_zero_stores_but_roundtrips() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut c = DefaultCompressor::<u8>::with_config(&CodecConfig { level: 0, ..Default::default() });
        let mut z = TypedBuffer::new();
        c.compress(&mut z, &bytes(&data), true).expect("compress");
        assert!(z.len() > data.len(), "stored blocks carry framing");
        assert_eq!(inflate_all(z.as_slice()).expect("inflate"), data);
    }

    #[test]
    fn concatenated_members_decode_back_to_back() {
        let mut c = DefaultCompressor::<u8>::new();
        let mut z = TypedBuffer::new();
        c.compress(&mut z, &bytes(b"abc"), true).expect("first member");
        c.compress(&mut z, &bytes(b"def"), true).expect("second member");
        assert_eq!(inflate_all(z.as_slice()).expect("inflate"), b"abcdef");
    }

    #[test]
    fn wide_units_roundtrip() {
        let units: Vec<u16> = (0..5_000u16).map(|i| i.wrapping_mul(31)).collect();
        let src = TypedBuffer::try_from(units.as_slice()).expect("buffer");

        let mut c = DefaultCompressor::<u16>::new();
        let mut z = TypedBuffer::<u8>::new();
        c.compress(&mut z, &src, true).expect("compress");

        let mut d = DefaultDecompressor::<u16>::new();
        let mut out = TypedBuffer::<u16>::new();
        d.decompress(&mut out, &z, true).expect("decompress");
        assert_eq!(out.as_slice(), units.as_slice());
    }

    #[test]
    fn trailing_partial_unit_is_zero_padded() {
        // 6 bytes of data read back as u32: the second unit is padded
        let z = deflate_all(&[1, 0, 0, 0, 2, 0]);
        let mut d = DefaultDecompressor::<u32>::new();
        let mut out = TypedBuffer::<u32>::new();
        d.decompress(&mut out, &bytes(&z), true).expect("decompress");
        assert_eq!(out.as_slice(), &[1, 2]);
        assert_eq!(d.pending_output(), 0);
        assert_eq!(d.padding(), 2, "two zero bytes completed the last unit");
    }

    // ---------------------------------------------------------------------
    // # ✅ 2. Reset and batching
    // ---------------------------------------------------------------------
    #[test]
    fn small_input_is_batched_until_flush() {
        let mut c = DefaultCompressor::<u8>::new();
        let mut z = TypedBuffer::new();
        c.compress(&mut z, &bytes(&[7u8; 100]), false).expect("compress");
        assert!(z.is_empty(), "nothing produced below the batch size");
        assert_eq!(c.pending_input(), 100);

        c.finish(&mut z).expect("finish");
        assert_eq!(c.pending_input(), 0);
        assert_eq!(inflate_all(z.as_slice()).expect("inflate"), vec![7u8; 100]);
    }

    #[test]
    fn compressor_reset_starts_an_independent_stream() {
        let text = b"repeat me please, repeat me please, ".repeat(40);
        let config = CodecConfig { batch_size: 1, ..Default::default() };
        let mut c = DefaultCompressor::<u8>::with_config(&config);

        // the engine sees this data, so its history holds it
        let mut before = TypedBuffer::new();
        c.compress(&mut before, &bytes(&text), false).expect("compress");
        assert_eq!(c.pending_input(), 0);

        c.compress(&mut before, &TypedBuffer::new(), false).expect("reset");
        assert_eq!(c.status(), status::OK);

        let mut after = TypedBuffer::new();
        c.compress(&mut after, &bytes(&text), true).expect("compress");
        assert_eq!(after.as_slice()[0], 0x78, "fresh zlib header");
        assert_eq!(inflate_all(after.as_slice()).expect("decodes on its own"), text);
    }

    #[test]
    fn decompressor_reset_drops_a_partial_member() {
        let first: Vec<u8> = (0..6_000u32).map(|i| (i * 13 % 251) as u8).collect();
        let z_first = deflate_all(&first);
        let z_second = deflate_all(b"only this survives");

        let config = CodecConfig { batch_size: 1, ..Default::default() };
        let mut d = DefaultDecompressor::<u8>::with_config(&config);
        let mut out = TypedBuffer::new();
        d.decompress(&mut out, &bytes(&z_first[..z_first.len() / 2]), false)
            .expect("half a member");

        d.decompress(&mut out, &TypedBuffer::new(), false).expect("reset");
        assert_eq!(d.pending_input(), 0);
        assert_eq!(d.pending_output(), 0);

        let mut fresh = TypedBuffer::new();
        d.decompress(&mut fresh, &bytes(&z_second), true).expect("fresh member");
        assert_eq!(fresh.as_slice(), b"only this survives");
    }

    #[test]
    fn batch_size_one_runs_engine_every_call() {
        let config = CodecConfig { batch_size: 1, ..Default::default() };
        let mut c = DefaultCompressor::<u8>::with_config(&config);
        let mut z = TypedBuffer::new();
        c.compress(&mut z, &bytes(b"x"), false).expect("compress");
        assert_eq!(c.pending_input(), 0, "engine consumed the input");
    }

    // ---------------------------------------------------------------------
    // # ✅ 3. Failures
    // ---------------------------------------------------------------------
    #[test]
    fn fail_codec_leaves_dest_untouched() {
        let mut c = FailCompressor::<u8>::new();
        let mut dest = bytes(b"prior");
        let err = c.compress(&mut dest, &bytes(b"abc"), true).unwrap_err();
        assert_eq!(err.code(), status::ERRNO);
        assert_eq!(dest.as_slice(), b"prior");

        let mut d = FailDecompressor::<u8>::new();
        assert!(d.finish(&mut dest).is_err());
        assert_eq!(dest.as_slice(), b"prior");
    }

    #[test]
    fn leftover_input_on_flush_is_protocol_corruption() {
        let mut c: CodecAdapter<HalfEngine, u8, u8> = CodecAdapter::from_engine(HalfEngine, 1);
        let mut dest = TypedBuffer::new();
        let err = c.compress(&mut dest, &bytes(b"abcdef"), true).unwrap_err();
        match err {
            CompressionError::ProtocolCorruption { leftover, .. } => assert_eq!(leftover, 3),
            other => panic!("expected ProtocolCorruption, got {other:?}"),
        }
        assert_eq!(c.status(), status::DATA_ERROR);
        assert!(c.message().is_some());
    }

    #[test]
    fn failed_call_rolls_back_staged_input() {
        let mut c: CodecAdapter<FlakyEngine, u8, u8> =
            CodecAdapter::from_engine(FlakyEngine { failed: false }, 1);
        let mut dest = TypedBuffer::new();
        assert!(c.compress(&mut dest, &bytes(b"abc"), true).is_err());
        assert_eq!(c.pending_input(), 0);
        assert!(dest.is_empty());
        assert_eq!(c.status(), status::BUF_ERROR);

        // nothing is accepted until the codec is reset
        assert!(c.is_poisoned());
        let again = c.compress(&mut dest, &bytes(b"xyz"), true).unwrap_err();
        assert_eq!(again.code(), status::BUF_ERROR);
        assert!(dest.is_empty());

        c.compress(&mut dest, &TypedBuffer::new(), false).expect("reset");
        assert!(!c.is_poisoned());
        c.compress(&mut dest, &bytes(b"xyz"), true).expect("after reset");
        assert_eq!(dest.as_slice(), b"xyz");
        assert_eq!(c.status(), status::STREAM_END);
        assert!(c.message().is_none());
    }

    #[test]
    fn failed_decode_keeps_no_partial_output() {
        let mut input = deflate_all(b"abc");
        input.extend_from_slice(b"garbage!");

        let mut d: CodecAdapter<InflateEngine, u8, u8> =
            CodecAdapter::from_engine(InflateEngine::new(), 1);
        let mut dest = TypedBuffer::new();
        let err = d.decompress(&mut dest, &bytes(&input), false).unwrap_err();
        assert_eq!(err.code(), status::DATA_ERROR);
        assert!(dest.is_empty());
        assert_eq!(d.pending_output(), 0, "output of the failed call is dropped");
        assert_eq!(d.pending_input(), 0);

        let z = deflate_all(b"xyz");
        assert!(d.decompress(&mut dest, &bytes(&z), true).is_err(), "still failed");

        d.decompress(&mut dest, &TypedBuffer::new(), false).expect("reset");
        d.decompress(&mut dest, &bytes(&z), true).expect("decode after reset");
        assert_eq!(dest.as_slice(), b"xyz");
    }

    #[test]
    fn corrupted_input_is_a_data_error() {
        let mut z = deflate_all(b"some text that compresses");
        z[0] = 0x00;
        let err = inflate_all(&z).unwrap_err();
        assert_eq!(err.code(), status::DATA_ERROR);
    }

    #[test]
    fn truncated_input_is_protocol_corruption() {
        let data: Vec<u8> = (0..4_000u32).map(|i| (i * 7 % 256) as u8).collect();
        let z = deflate_all(&data);
        let err = inflate_all(&z[..z.len() - 5]).unwrap_err();
        assert!(matches!(err, CompressionError::ProtocolCorruption { .. }), "got {err:?}");
    }

    // ---------------------------------------------------------------------
    // # ✅ 4. Pass-through and registry
    // ---------------------------------------------------------------------
    #[test]
    fn passthrough_converts_units_by_value() {
        let mut c = NoCompressor::<u16, u8>::new();
        let mut dest = TypedBuffer::<u8>::new();
        let src = TypedBuffer::try_from(&[0x0102u16, 0x00ff][..]).expect("buffer");
        c.compress(&mut dest, &src, false).expect("compress");
        assert_eq!(dest.as_slice(), &[0x02, 0xff]);

        let mut d = NoDecompressor::<u8>::new();
        let mut back = TypedBuffer::<u8>::new();
        d.decompress(&mut back, &dest, true).expect("decompress");
        assert_eq!(back.as_slice(), dest.as_slice());
    }

    #[test]
    fn registry_resolves_known_ids() {
        let info = resolve(codec_ids::DEFLATE).expect("deflate");
        assert_eq!(info.name, "deflate");
        assert!(info.compresses);
        assert_eq!(resolve(codec_ids::NONE).expect("none").name, "none");

        let err = resolve(0x1234).err().expect("unknown id");
        assert!(err.to_string().contains("0x1234"), "{err}");
    }

    #[test]
    fn codec_names_parse() {
        assert_eq!("zlib".parse::<CompressionCodec>().expect("zlib"), CompressionCodec::Deflate);
        assert_eq!("STORE".parse::<CompressionCodec>().expect("store"), CompressionCodec::None);
        assert!("lzma".parse::<CompressionCodec>().is_err());
        assert_eq!(CompressionCodec::Deflate.to_string(), "deflate");
    }

    #[test]
    fn registry_codecs_roundtrip_as_trait_objects() {
        let config = CodecConfig::default();
        for codec in [CompressionCodec::None, CompressionCodec::Deflate] {
            let mut c = create_compressor(codec, &config);
            let mut d = create_decompressor(codec, &config);
            let mut z = TypedBuffer::new();
            c.compress(&mut z, &bytes(b"registry"), true).expect("compress");
            let mut out = TypedBuffer::new();
            d.decompress(&mut out, &z, true).expect("decompress");
            assert_eq!(out.as_slice(), b"registry", "codec {}", c.name());
        }
    }
}

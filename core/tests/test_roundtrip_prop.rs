#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use proptest::prelude::*;
    use zstream_core::compression::{DefaultCompressor, DefaultDecompressor};
    use zstream_core::config::{CodecConfig, StreamConfig};
    use zstream_core::stream::{ZReader, ZWriter};

    fn stream_config() -> impl Strategy<Value = StreamConfig> {
        (1usize..6_000, 1usize..6_000)
            .prop_map(|(window_size, read_chunk)| StreamConfig { window_size, read_chunk })
    }

    fn codec_config() -> impl Strategy<Value = CodecConfig> {
        (0u32..=9, 1usize..10_000).prop_map(|(level, batch_size)| CodecConfig { level, batch_size })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn bytes_roundtrip(
            data in proptest::collection::vec(any::<u8>(), 0..20_000),
            split in 1usize..3_000,
            stream in stream_config(),
            codec in codec_config(),
        ) {
            let mut z = Vec::new();
            let mut enc = DefaultCompressor::<u8>::with_config(&codec);
            {
                let mut w = ZWriter::with_config(&mut z, &mut enc, stream).expect("writer");
                for piece in data.chunks(split) {
                    w.write_all(piece).expect("write");
                }
                w.close().expect("close");
            }

            let mut src = z.as_slice();
            let mut dec = DefaultDecompressor::<u8>::with_config(&codec);
            let mut r = ZReader::with_config(&mut src, &mut dec, stream).expect("reader");
            let mut back = Vec::new();
            r.read_to_end(&mut back).expect("read");
            prop_assert_eq!(back, data);
        }

        #[test]
        fn u32_units_roundtrip(
            units in proptest::collection::vec(any::<u32>(), 0..5_000),
            stream in stream_config(),
        ) {
            let mut z = Vec::new();
            let mut enc = DefaultCompressor::<u32>::new();
            {
                let mut w = ZWriter::with_config(&mut z, &mut enc, stream).expect("writer");
                w.write_units(&units).expect("write");
                w.close().expect("close");
            }

            let mut src = z.as_slice();
            let mut dec = DefaultDecompressor::<u32>::new();
            let mut r = ZReader::with_config(&mut src, &mut dec, stream).expect("reader");
            let mut back = Vec::new();
            r.read_to_end_units(&mut back).expect("read");
            prop_assert_eq!(back, units);
        }
    }
}

use std::io::{Read, Write};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zstream_core::compression::{DefaultCompressor, DefaultDecompressor, NoCompressor};
use zstream_core::stream::{ZReader, ZWriter};

fn payload(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 61) as u8 ^ (i / 4096) as u8).collect()
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("zwriter");
    for size in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let data = payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("deflate", size), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size / 2);
                let mut codec = DefaultCompressor::<u8>::new();
                let mut w = ZWriter::new(&mut out, &mut codec);
                w.write_all(data).unwrap();
                w.close().unwrap();
                drop(w);
                black_box(out)
            });
        });
        group.bench_with_input(BenchmarkId::new("none", size), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size);
                let mut codec = NoCompressor::<u8>::new();
                let mut w = ZWriter::new(&mut out, &mut codec);
                w.write_all(data).unwrap();
                w.close().unwrap();
                drop(w);
                black_box(out)
            });
        });
    }
    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("zreader");
    for size in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let mut z = Vec::new();
        let mut codec = DefaultCompressor::<u8>::new();
        let mut w = ZWriter::new(&mut z, &mut codec);
        w.write_all(&payload(size)).unwrap();
        w.close().unwrap();
        drop(w);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("deflate", size), &z, |b, z| {
            b.iter(|| {
                let mut src = z.as_slice();
                let mut codec = DefaultDecompressor::<u8>::new();
                let mut out = Vec::with_capacity(size);
                ZReader::new(&mut src, &mut codec).read_to_end(&mut out).unwrap();
                black_box(out)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);

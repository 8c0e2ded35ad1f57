//! Benchmarks for bytepump.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bytepump::{ByteRange, ConsumableBuffer, ExpandingFile, StreamConfig, StreamPipeline};

fn bench_buffer_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("consumable_buffer");
    let size = 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    for step in [16u64, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("read_{step}"), |b| {
            let mut cursor = ConsumableBuffer::new(data.clone());
            b.iter(|| {
                cursor.reset();
                while cursor.remaining() >= step {
                    black_box(cursor.read(step).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let size = 4 * 1024 * 1024;
    let source = dir.path().join("source.bin");
    std::fs::write(&source, vec![0x5Au8; size]).unwrap();
    let out_path = dir.path().join("out.bin");
    let (source, out_path) = (&source, &out_path);

    for chunk_size in [8 * 1024, 64 * 1024, 1024 * 1024] {
        let config = StreamConfig::new(chunk_size).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("path_{}k", chunk_size / 1024), |b| {
            b.to_async(&rt).iter(|| async move {
                let mut out = ExpandingFile::new(out_path);
                out.open().await.unwrap();
                let mut pipeline = StreamPipeline::load_with_config(&mut out, config).unwrap();
                let result = pipeline.pump_path(source, ByteRange::full()).await.unwrap();
                drop(pipeline);
                out.close().await.unwrap();
                black_box(result.wrote)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_buffer_reads, bench_pipeline);
criterion_main!(benches);

//! Performance benchmarks for hash algorithms
//!
//! Measures the in-memory digest path against the streaming file path, and
//! the effect of the chunk size on streaming throughput.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hashkit_core::{FileHasher, HashAlgorithm, HashCalculator};
use std::hint::black_box;
use tokio::runtime::Runtime;

/// Benchmark every algorithm over in-memory buffers
fn benchmark_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");
    let calculator = HashCalculator::new();

    let sizes = vec![
        1_024,     // 1KB
        102_400,   // 100KB
        1_048_576, // 1MB
    ];

    for size in sizes {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for algorithm in HashAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), format_size(size)),
                &data,
                |b, data| {
                    b.iter(|| {
                        let result = calculator
                            .calculate_bytes(algorithm, black_box(data))
                            .unwrap();
                        black_box(result.digest);
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the streaming file path with different chunk sizes
fn benchmark_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_sizes");
    let rt = Runtime::new().unwrap();

    let size = 10_485_760; // 10MB
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test_10mb.bin");
    std::fs::write(&file_path, generate_test_data(size)).unwrap();
    group.throughput(Throughput::Bytes(size as u64));

    for chunk_size in [4_096usize, 65_536, 1_048_576] {
        let hasher = FileHasher::with_chunk_size(chunk_size);
        group.bench_with_input(
            BenchmarkId::new("sha256", format_size(chunk_size)),
            &chunk_size,
            |b, _| {
                b.iter(|| {
                    rt.block_on(async {
                        let result = hasher
                            .hash_file(&file_path, HashAlgorithm::SHA256)
                            .await
                            .unwrap();
                        black_box(result.digest);
                    });
                });
            },
        );
    }

    group.finish();
}

/// Compare streaming a file with hashing the same bytes in memory
fn benchmark_streaming_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_overhead");
    let rt = Runtime::new().unwrap();

    let size = 1_048_576; // 1MB
    let data = generate_test_data(size);
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test_1mb.bin");
    std::fs::write(&file_path, &data).unwrap();
    group.throughput(Throughput::Bytes(size as u64));

    let calculator = HashCalculator::new();
    group.bench_function("in_memory_md5", |b| {
        b.iter(|| {
            let result = calculator
                .calculate_bytes(HashAlgorithm::MD5, black_box(&data))
                .unwrap();
            black_box(result.digest);
        })
    });

    let hasher = FileHasher::new();
    group.bench_function("streaming_md5", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result = hasher
                    .hash_file(&file_path, HashAlgorithm::MD5)
                    .await
                    .unwrap();
                black_box(result.digest);
            });
        })
    });

    group.finish();
}

// Helper functions

fn generate_test_data(size: usize) -> Vec<u8> {
    // Deterministic data for reproducible benchmarks
    let mut data = Vec::with_capacity(size);
    let mut seed = 0x12345678u32;

    for _ in 0..size {
        data.push((seed & 0xFF) as u8);
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    }

    data
}

fn format_size(size: usize) -> String {
    if size >= 1_048_576 {
        format!("{}MB", size / 1_048_576)
    } else if size >= 1_024 {
        format!("{}KB", size / 1_024)
    } else {
        format!("{size}B")
    }
}

criterion_group!(
    benches,
    benchmark_hash_algorithms,
    benchmark_chunk_sizes,
    benchmark_streaming_overhead
);

criterion_main!(benches);

//! Partitioning and writing throughput on generated weekly bundles.
//!
//! Run with: `cargo bench --package ratedata-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ratedata_acquire::write_partitioned;
use ratedata_bench::{BundleConfig, synthetic_bundle};
use ratedata_partition::partition_bundle;
use ratedata_store::SegmentWriter;
use ratedata_types::parse_timestamp;
use std::hint::black_box;
use tempfile::TempDir;

fn bundle_configs() -> Vec<(&'static str, BundleConfig)> {
    vec![
        ("fractional", BundleConfig::default()),
        (
            "whole-second",
            BundleConfig {
                fractional: false,
                ..Default::default()
            },
        ),
    ]
}

fn timestamp_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_timestamp");
    for raw in ["2015-03-02 23:59:59.999000001", "2015-03-02 23:59:59"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, raw| {
            b.iter(|| parse_timestamp(black_box(raw)));
        });
    }
    group.finish();
}

fn partition_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    for (name, config) in bundle_configs() {
        let bundle = synthetic_bundle(&config);
        group.throughput(Throughput::Bytes(bundle.len() as u64));
        group.bench_with_input(BenchmarkId::new("week", name), &bundle, |b, bundle| {
            b.iter(|| partition_bundle(black_box(bundle.as_bytes())).unwrap());
        });
    }
    group.finish();
}

fn write_benchmark(c: &mut Criterion) {
    let config = BundleConfig::default();
    let bundle = synthetic_bundle(&config);
    let dir = TempDir::new().unwrap();
    let writer = SegmentWriter::new();

    let mut group = c.benchmark_group("write");
    group.sample_size(20);
    group.throughput(Throughput::Elements(config.total_ticks()));
    group.bench_function("week", |b| {
        b.iter(|| write_partitioned(bundle.as_bytes(), dir.path(), &writer).unwrap());
    });
    group.finish();
}

criterion_group!(benches, timestamp_benchmark, partition_benchmark, write_benchmark);
criterion_main!(benches);

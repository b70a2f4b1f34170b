//! Benchmark runner that outputs a markdown table for the README.
//!
//! Run with: `cargo run --package ratedata-bench --bin benchmark_table --release`

use ratedata_bench::{BundleConfig, format_bytes, format_duration, run_partition};

/// Number of iterations per benchmark for statistical significance.
const ITERATIONS: u32 = 5;

fn main() {
    println!("ratedata partition benchmark");
    println!("============================\n");
    println!("Running benchmarks ({ITERATIONS} iterations each)...\n");

    let configs = [
        (
            "1 day",
            BundleConfig {
                days: 1,
                ..Default::default()
            },
        ),
        ("1 week", BundleConfig::default()),
        (
            "1 week, whole seconds",
            BundleConfig {
                fractional: false,
                ..Default::default()
            },
        ),
        (
            "1 busy week",
            BundleConfig {
                ticks_per_day: 200_000,
                ..Default::default()
            },
        ),
    ];

    println!("| Bundle | Size | Ticks | Days | Time | Throughput | Ticks/s |");
    println!("|--------|------|-------|------|------|------------|---------|");

    for (name, config) in &configs {
        let Some(result) = run_partition(name, config, ITERATIONS) else {
            eprintln!("{name}: generated bundle failed to partition");
            std::process::exit(1);
        };
        println!(
            "| {} | {} | {} | {} | {} | {:.1} MB/s | {:.0} |",
            result.label,
            format_bytes(result.input_bytes),
            result.ticks,
            result.segments,
            format_duration(result.duration),
            result.throughput_mbps(),
            result.ticks_per_sec()
        );
    }
}

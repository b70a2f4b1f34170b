//! Benchmark utilities for ratedata.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use ratedata_partition::partition_bundle;
use std::fmt::Write;
use std::time::{Duration, Instant};

/// Shape of a generated bundle.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// First trading day.
    pub start: NaiveDate,
    /// Number of calendar days covered.
    pub days: u32,
    /// Ticks generated per day, evenly spaced.
    pub ticks_per_day: u32,
    /// Whether timestamps carry the nanosecond fraction (`.fffffffff`).
    pub fractional: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap_or_default(),
            // One trading week
            days: 5,
            ticks_per_day: 20_000,
            fractional: true,
        }
    }
}

impl BundleConfig {
    /// Returns the total number of ticks.
    pub const fn total_ticks(&self) -> u64 {
        self.days as u64 * self.ticks_per_day as u64
    }
}

/// Generates the csv contents of a weekly bundle, header included.
pub fn synthetic_bundle(config: &BundleConfig) -> String {
    let mut out = String::with_capacity(config.total_ticks() as usize * 64 + 64);
    out.push_str("lTid,cDealable,CurrencyPair,RateDateTime,RateBid,RateAsk\n");

    let step_ms = 86_400_000 / i64::from(config.ticks_per_day.max(1));
    let mut id: u64 = 0;
    for day in 0..config.days {
        let midnight =
            (config.start + TimeDelta::days(i64::from(day))).and_time(NaiveTime::default());
        for n in 0..config.ticks_per_day {
            id += 1;
            let ts = midnight + TimeDelta::milliseconds(step_ms * i64::from(n));
            let bid = 1.1 + f64::from(n % 500) * 0.00001;
            let _ = if config.fractional {
                write!(out, "{id},D,EUR/USD,{}", ts.format("%Y-%m-%d %H:%M:%S%.9f"))
            } else {
                write!(out, "{id},D,EUR/USD,{}", ts.format("%Y-%m-%d %H:%M:%S"))
            };
            let _ = writeln!(out, ",{bid:.5},{:.5}", bid + 0.00018);
        }
    }
    out
}

/// Result of timing one bundle size.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Label of the configuration.
    pub label: String,
    /// Average duration of one partition pass.
    pub duration: Duration,
    /// Size of the bundle in bytes.
    pub input_bytes: u64,
    /// Number of ticks in the bundle.
    pub ticks: u64,
    /// Number of day segments produced.
    pub segments: usize,
}

impl BenchmarkResult {
    /// Calculate throughput in MB/s.
    pub fn throughput_mbps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.input_bytes as f64 / 1_000_000.0) / secs
        } else {
            0.0
        }
    }

    /// Calculate ticks per second.
    pub fn ticks_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 { self.ticks as f64 / secs } else { 0.0 }
    }
}

/// Partitions a generated bundle `iterations` times and averages the duration.
///
/// Returns `None` if the generated bundle fails to partition.
pub fn run_partition(
    label: &str,
    config: &BundleConfig,
    iterations: u32,
) -> Option<BenchmarkResult> {
    let bundle = synthetic_bundle(config);
    let iterations = iterations.max(1);

    let mut segments = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        segments = partition_bundle(bundle.as_bytes()).ok()?.len();
    }
    let duration = start.elapsed() / iterations;

    Some(BenchmarkResult {
        label: label.to_string(),
        duration,
        input_bytes: bundle.len() as u64,
        ticks: config.total_ticks(),
        segments,
    })
}

/// Format duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Format bytes for display.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_bundle_partitions_by_day() {
        let config = BundleConfig {
            days: 3,
            ticks_per_day: 10,
            ..Default::default()
        };
        let segments = partition_bundle(synthetic_bundle(&config).as_bytes()).unwrap();

        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.len() == 10));
    }

    #[test]
    fn test_whole_second_bundle() {
        let config = BundleConfig {
            days: 1,
            ticks_per_day: 4,
            fractional: false,
            ..Default::default()
        };
        let result = run_partition("tiny", &config, 2).unwrap();
        assert_eq!(result.segments, 1);
        assert_eq!(result.ticks, 4);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
    }
}

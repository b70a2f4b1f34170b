//! Display utilities for the ratedata CLI.

use ratedata_lib::prelude::*;
use ratedata_lib::UnitStatus;
use std::path::Path;

/// Print what a download is about to do.
pub(crate) fn print_plan(
    symbols: &[Symbol],
    months: &MonthRange,
    bundles: usize,
    data_root: &Path,
) {
    let names: Vec<_> = symbols.iter().map(Symbol::as_str).collect();

    println!("Download plan:");
    println!("  Symbols: {}", names.join(", "));
    println!("  Months: {months} ({} months)", months.total_months());
    println!("  Bundles: {bundles}");
    println!("  Output: {}", data_root.display());
    println!();
}

/// Print the outcome of a run.
pub(crate) fn print_report(report: &RunReport, data_root: &Path) {
    println!("\nDownload complete:");
    println!("  Bundles written: {}", report.written());
    println!("  Day files: {}", report.segments());
    println!("  Ticks: {}", report.ticks());

    if report.skipped() > 0 {
        println!("  Skipped: {}", report.skipped());
        for reason in SkipReason::ALL {
            let count = report.skipped_for(reason);
            if count > 0 {
                println!("    {reason}: {count}");
            }
        }
    }

    let failures: Vec<_> = report
        .outcomes()
        .iter()
        .filter(|o| {
            matches!(
                o.status,
                UnitStatus::Skipped { reason, .. } if reason != SkipReason::Missing
            )
        })
        .collect();
    if !failures.is_empty() {
        println!("\nFailures:");
        for (i, outcome) in failures.iter().enumerate() {
            println!("  {}: {outcome}", i + 1);
        }
    }

    println!("\nOutput directory: {}", data_root.display());
}

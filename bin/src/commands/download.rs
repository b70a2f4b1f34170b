//! Download command implementation.
//!
//! Builds the bundle plan, fetches every bundle and writes its day files.

use crate::display::{print_plan, print_report};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, MultiSelect};
use ratedata_lib::prelude::*;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Arguments of the download command.
#[derive(Debug)]
pub(crate) struct DownloadArgs {
    pub(crate) symbols: Vec<String>,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) data_root: PathBuf,
    pub(crate) mirror: Option<PathBuf>,
    pub(crate) concurrency: usize,
    pub(crate) retries: u32,
    pub(crate) sync: bool,
    pub(crate) report: Option<PathBuf>,
    pub(crate) yes: bool,
    pub(crate) quiet: bool,
}

/// Download the requested months and split every bundle by day.
pub(crate) async fn download(args: DownloadArgs) -> Result<()> {
    let interactive = !args.yes && !args.quiet && std::io::stdin().is_terminal();

    let symbols = if !args.symbols.is_empty() {
        parse_symbols(&args.symbols)?
    } else if interactive {
        let chosen = MultiSelect::new("Currency pairs:", Symbol::known())
            .with_all_selected_by_default()
            .prompt()
            .context("Symbol selection cancelled")?;
        parse_symbols(chosen.iter().map(Symbol::as_str))?
    } else {
        Symbol::known()
    };

    let months = MonthRange::parse(&args.from, &args.to)?;
    let plan = bundle_plan(&months, &symbols);

    if interactive {
        print_plan(&symbols, &months, plan.len(), &args.data_root);
        let proceed = Confirm::new("Proceed with download?")
            .with_default(true)
            .prompt()
            .context("Confirmation cancelled")?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(plan.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} bundles ({percent}%) {msg}")?
                .progress_chars("=>-"),
        );
        pb.set_message(months.to_string());
        pb
    };

    let config = AcquireConfig {
        concurrency: args.concurrency,
        sync: args.sync,
    };
    let layout = DataLayout::new(&args.data_root);

    let report = match &args.mirror {
        Some(mirror) => {
            run_plan(DirectorySource::new(mirror), layout, &config, plan, &progress).await
        }
        None => {
            let client = DownloadClient::new(ClientConfig {
                concurrency: args.concurrency,
                max_retries: args.retries,
                ..Default::default()
            })?;
            run_plan(client, layout, &config, plan, &progress).await
        }
    };

    progress.finish_with_message(format!(
        "{} bundles written, {} skipped",
        report.written(),
        report.skipped()
    ));

    if let Some(path) = &args.report {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if !args.quiet {
        print_report(&report, &args.data_root);
    }

    Ok(())
}

async fn run_plan<S: BundleSource + 'static>(
    source: S,
    layout: DataLayout,
    config: &AcquireConfig,
    plan: Vec<BundleKey>,
    progress: &ProgressBar,
) -> RunReport {
    Acquisition::with_config(source, layout, config)
        .run_with_progress(plan, |outcome| {
            progress.set_message(outcome.key.to_string());
            progress.inc(1);
        })
        .await
}

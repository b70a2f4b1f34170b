//! The acquisition loop.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use ratedata_fetch::{BundleSource, DownloadError};
use ratedata_store::{DataLayout, SegmentWriter};
use ratedata_types::BundleKey;
use std::sync::Arc;

use crate::{BundleError, RunReport, SkipReason, UnitOutcome, process_bundle};

/// Tunables of an acquisition run.
#[derive(Debug, Clone)]
pub struct AcquireConfig {
    /// Maximum bundles downloaded at once.
    pub concurrency: usize,
    /// Whether day files are synced to disk before being renamed into place.
    pub sync: bool,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            sync: false,
        }
    }
}

/// Runs bundle plans: fetch, extract, partition, write.
///
/// Downloads run as their own tasks, up to the concurrency limit ahead of the
/// bundle being settled, so they keep progressing while a transform runs.
/// Outcomes are settled strictly in plan order and each bundle's transform
/// finishes before the next begins.
#[derive(Debug)]
pub struct Acquisition<S> {
    source: Arc<S>,
    layout: DataLayout,
    writer: SegmentWriter,
    concurrency: usize,
}

impl<S: BundleSource + 'static> Acquisition<S> {
    /// Creates an acquisition writing below `layout`.
    ///
    /// A concurrency of zero is treated as one.
    #[must_use]
    pub fn new(source: S, layout: DataLayout, concurrency: usize) -> Self {
        Self {
            source: Arc::new(source),
            layout,
            writer: SegmentWriter::new(),
            concurrency: concurrency.max(1),
        }
    }

    /// Creates an acquisition from a config.
    #[must_use]
    pub fn with_config(source: S, layout: DataLayout, config: &AcquireConfig) -> Self {
        Self::new(source, layout, config.concurrency)
            .with_writer(SegmentWriter::new().with_sync(config.sync))
    }

    /// Replaces the segment writer.
    #[must_use]
    pub const fn with_writer(mut self, writer: SegmentWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Returns the output layout.
    #[must_use]
    pub const fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Returns the download concurrency.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Processes every bundle of `plan`, in order.
    ///
    /// Never fails as a whole: each bundle's result is recorded in the report.
    pub async fn run(&self, plan: Vec<BundleKey>) -> RunReport {
        self.run_with_progress(plan, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_unit` as each bundle is settled.
    pub async fn run_with_progress<F>(&self, plan: Vec<BundleKey>, mut on_unit: F) -> RunReport
    where
        F: FnMut(&UnitOutcome),
    {
        tracing::info!(bundles = plan.len(), concurrency = self.concurrency, "starting run");

        let mut fetches = stream::iter(plan)
            .map(|key| {
                let source = Arc::clone(&self.source);
                let fetch_key = key.clone();
                let handle = tokio::spawn(async move { source.fetch(&fetch_key).await });
                async move { (key, handle.await) }
            })
            .buffered(self.concurrency);

        let mut report = RunReport::new();
        while let Some((key, joined)) = fetches.next().await {
            let outcome = match joined {
                Ok(result) => self.settle(key, result).await,
                Err(e) => {
                    tracing::warn!(
                        symbol = %key.symbol, year = key.year, month = key.month, week = key.week,
                        error = %e, "download task failed"
                    );
                    UnitOutcome::skipped(
                        key,
                        SkipReason::Transport,
                        Some(format!("download task failed: {e}")),
                    )
                }
            };
            on_unit(&outcome);
            report.push(outcome);
        }

        tracing::info!(
            written = report.written(),
            skipped = report.skipped(),
            segments = report.segments(),
            "run finished"
        );
        report
    }

    async fn settle(
        &self,
        key: BundleKey,
        fetched: Result<Option<Bytes>, DownloadError>,
    ) -> UnitOutcome {
        let bytes = match fetched {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::warn!(
                    symbol = %key.symbol, year = key.year, month = key.month, week = key.week,
                    "bundle not found"
                );
                return UnitOutcome::skipped(key, SkipReason::Missing, None);
            }
            Err(e) => {
                tracing::warn!(
                    symbol = %key.symbol, year = key.year, month = key.month, week = key.week,
                    error = %e, "download failed"
                );
                return UnitOutcome::skipped(key, SkipReason::Transport, Some(e.to_string()));
            }
        };

        let dir = match self.layout.ensure_symbol_dir(&key.symbol) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!(
                    symbol = %key.symbol, path = %e.path().display(), error = %e,
                    "cannot create symbol directory"
                );
                return UnitOutcome::skipped(key, SkipReason::Store, Some(e.to_string()));
            }
        };

        let writer = self.writer;
        let processed =
            match tokio::task::spawn_blocking(move || process_bundle(&bytes, &dir, &writer)).await
            {
                Ok(result) => result,
                Err(e) => Err(BundleError::from(e)),
            };

        match processed {
            Ok(summary) => {
                tracing::info!(
                    symbol = %key.symbol, year = key.year, month = key.month, week = key.week,
                    segments = summary.segments(), ticks = summary.ticks,
                    "bundle written"
                );
                UnitOutcome::written(key, summary.segments(), summary.ticks, summary.files)
            }
            Err(e) => {
                let reason = e.skip_reason();
                tracing::warn!(
                    symbol = %key.symbol, year = key.year, month = key.month, week = key.week,
                    %reason, error = %e, "bundle skipped"
                );
                UnitOutcome::skipped(key, reason, Some(e.to_string()))
            }
        }
    }
}

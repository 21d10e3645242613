// File: crates/history-core/src/pipeline.rs
// Summary: End-to-end preparation of a price history for the chart: ingest, sanitize, downsample, summarize.

use tracing::{info, warn};

use crate::config::HistoryOptions;
use crate::ingest::{ingest_records, IngestReport, RawPriceRecord};
use crate::series::{Series, TimeCoverage};
use crate::trend::PriceTrend;

#[derive(Clone, Debug)]
pub struct PreparedHistory {
    /// Every accepted point, chronological.
    pub full: Series,
    /// What the chart plots: `full` reduced to the point budget.
    pub plotted: Series,
    pub report: IngestReport,
    pub trend: Option<PriceTrend>,
}

/// Build the chart-ready history from raw backend records.
pub fn prepare_history<I>(records: I, opts: &HistoryOptions) -> PreparedHistory
where
    I: IntoIterator<Item = RawPriceRecord>,
{
    let (ingested, report) = ingest_records(records, &opts.ingest);
    prepare_series(ingested, report, opts.max_points)
}

/// Same as `prepare_history` for a series built elsewhere.
pub fn prepare_series(series: Series, report: IngestReport, max_points: usize) -> PreparedHistory {
    let full = series.sanitized();
    if full.len() != series.len() {
        warn!(removed = series.len() - full.len(), "removed points with non-finite prices");
    }
    if full.time_coverage() == TimeCoverage::Partial {
        warn!("series mixes timestamps and untimed points; index fallback skews x spacing");
    }
    if !full.is_chronological() {
        warn!("series timestamps are not in ascending order");
    }

    let plotted = full.downsample_lttb(max_points);
    let trend = full.trend();
    info!(
        accepted = report.accepted,
        dropped = report.dropped(),
        points = full.len(),
        plotted = plotted.len(),
        max_points,
        "prepared price history"
    );
    PreparedHistory { full, plotted, report, trend }
}

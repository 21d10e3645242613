// File: crates/history-demo/src/main.rs
// Summary: Demo loads a raw price-history file (JSON or CSV), prepares the chart series and prints/writes it.

use anyhow::{Context, Result};
use history_core::{
    format_compact_inr, format_inr, parse_json, prepare_history, read_csv, ChartViewport, HistoryOptions,
    PreparedHistory, RawPriceRecord,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    input: PathBuf,
    max_points: Option<usize>,
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args(std::env::args().skip(1))?;
    let mut opts = HistoryOptions::from_env().context("reading HISTORY_* environment")?;
    if let Some(n) = args.max_points {
        opts.max_points = n;
    }

    info!(input = %args.input.display(), max_points = opts.max_points, "loading price history");
    let records = load_records(&args.input)
        .with_context(|| format!("failed to load '{}'", args.input.display()))?;
    if records.is_empty() {
        anyhow::bail!("no records found in {}", args.input.display());
    }

    let prepared = prepare_history(records, &opts);
    if prepared.full.is_empty() {
        anyhow::bail!("every record was dropped ({} total); check dates and prices", prepared.report.dropped());
    }
    print_summary(&prepared);

    if let Some(out) = args.out {
        let json = serde_json::to_string_pretty(&prepared.plotted)?;
        std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

/// Console logging, filter from `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `history-demo <input.(json|csv)> [max_points] [--out <path>]`
fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<Args> {
    let mut input = None;
    let mut max_points = None;
    let mut out = None;
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let p = it.next().context("--out needs a path")?;
                out = Some(PathBuf::from(p));
            }
            _ if input.is_none() => input = Some(PathBuf::from(&arg)),
            _ if max_points.is_none() => {
                max_points = Some(arg.parse::<usize>().with_context(|| format!("invalid max_points '{arg}'"))?);
            }
            _ => anyhow::bail!("unexpected argument '{arg}'"),
        }
    }
    let input = input.context("usage: history-demo <input.(json|csv)> [max_points] [--out <path>]")?;
    Ok(Args { input, max_points, out })
}

fn load_records(path: &Path) -> Result<Vec<RawPriceRecord>> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)?
        }
        _ => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)?
        }
    };
    Ok(records)
}

fn print_summary(p: &PreparedHistory) {
    let r = &p.report;
    println!(
        "Records: {} accepted, {} dropped (sentinel {}, no price {}, bad price {}, no date {}, bad date {})",
        r.accepted,
        r.dropped(),
        r.sentinel_price,
        r.missing_price,
        r.non_finite_price,
        r.missing_date,
        r.bad_date
    );
    if let Some((lo, hi)) = p.full.price_range() {
        println!("Price range: [{}, {}] across {} points", format_compact_inr(lo), format_compact_inr(hi), p.full.len());
    }

    let vp = ChartViewport::default();
    println!("Plotting {} of {} points (chart width {}px)", p.plotted.len(), p.full.len(), vp.width_for(p.plotted.len()));
    for point in p.plotted.iter() {
        let when = point.full_date.as_deref().unwrap_or("-");
        println!("  {:<12} {:>14}", when, format_inr(point.price));
    }
    if let Some(trend) = &p.trend {
        println!("{}", trend.headline());
    }
}

// File: crates/history-core/src/ingest.rs
// Summary: Turns raw backend price records (JSON or CSV) into a clean, chronological Series.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::IngestOptions;
use crate::error::{HistoryError, Result};
use crate::series::Series;
use crate::types::PricePoint;

const DATE_COLUMNS: &[&str] = &["date", "time", "timestamp", "datetime"];
const PRICE_COLUMNS: &[&str] = &["price", "value", "close"];
const ENVELOPE_KEYS: &[&str] = &["priceHistory", "history", "data"];

/// Epoch values at or above this are milliseconds, below are seconds.
const EPOCH_MS_CUTOFF: i64 = 1_000_000_000_000;

/// Date as sent by the backend: text or a bare epoch number.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Epoch(i64),
    Text(String),
}

/// One record of the backend's price history payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawPriceRecord {
    #[serde(default, alias = "timestamp", alias = "time")]
    pub date: Option<RawDate>,
    #[serde(default, alias = "value")]
    pub price: Option<f64>,
}

impl RawPriceRecord {
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self { date: Some(RawDate::Text(date.into())), price: Some(price) }
    }
}

/// Counts of accepted and dropped records, by reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub missing_price: usize,
    pub sentinel_price: usize,
    pub non_finite_price: usize,
    pub missing_date: usize,
    pub bad_date: usize,
}

impl IngestReport {
    pub fn dropped(&self) -> usize {
        self.missing_price + self.sentinel_price + self.non_finite_price + self.missing_date + self.bad_date
    }
}

/// Parse a date field into epoch milliseconds (UTC).
/// Instants outside chrono's calendar range are rejected.
pub fn parse_timestamp_ms(raw: &RawDate) -> Option<i64> {
    let ms = match raw {
        RawDate::Epoch(n) => epoch_to_ms(*n),
        RawDate::Text(s) => parse_time_text(s)?,
    };
    DateTime::<Utc>::from_timestamp_millis(ms).map(|_| ms)
}

fn epoch_to_ms(n: i64) -> i64 {
    if n.unsigned_abs() >= EPOCH_MS_CUTOFF.unsigned_abs() { n } else { n.saturating_mul(1000) }
}

fn parse_time_text(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(epoch_to_ms(n));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc().timestamp_millis())
}

/// Short axis label and long tooltip string for a timestamp, e.g. ("Jan 05", "05 Jan 2025").
pub fn date_labels(time_ms: i64) -> Option<(String, String)> {
    let dt = DateTime::<Utc>::from_timestamp_millis(time_ms)?;
    Some((dt.format("%b %d").to_string(), dt.format("%d %b %Y").to_string()))
}

/// Round half away from zero to `decimals` places (capped at 12).
/// Values too large to scale are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let f = 10f64.powi(decimals.min(12) as i32);
    let scaled = value * f;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / f
}

/// Filter, convert, label and sort raw records.
/// Records with a missing/sentinel/non-finite price or a missing/unparseable date are dropped.
pub fn ingest_records<I>(records: I, opts: &IngestOptions) -> (Series, IngestReport)
where
    I: IntoIterator<Item = RawPriceRecord>,
{
    let mut report = IngestReport::default();
    let mut points: Vec<(i64, PricePoint)> = Vec::new();

    for (row, rec) in records.into_iter().enumerate() {
        let raw_price = match rec.price {
            Some(p) => p,
            None => {
                debug!(row, "dropping record without price");
                report.missing_price += 1;
                continue;
            }
        };
        if raw_price == opts.sentinel {
            debug!(row, "dropping sentinel price");
            report.sentinel_price += 1;
            continue;
        }
        if !raw_price.is_finite() {
            debug!(row, raw_price, "dropping non-finite price");
            report.non_finite_price += 1;
            continue;
        }
        let time = match rec.date.as_ref() {
            None => {
                debug!(row, "dropping record without date");
                report.missing_date += 1;
                continue;
            }
            Some(d) => match parse_timestamp_ms(d) {
                Some(t) => t,
                None => {
                    debug!(row, date = ?d, "dropping unparseable date");
                    report.bad_date += 1;
                    continue;
                }
            },
        };

        let price = round_to(raw_price / opts.price_divisor, opts.round_decimals);
        if !price.is_finite() {
            debug!(row, raw_price, "dropping price that overflows after conversion");
            report.non_finite_price += 1;
            continue;
        }
        let mut point = PricePoint::new(time, price);
        if let Some((label, full)) = date_labels(time) {
            point = point.with_labels(label, full);
        }
        points.push((time, point));
        report.accepted += 1;
    }

    // Stable: equal timestamps keep their input order.
    points.sort_by_key(|(t, _)| *t);
    (points.into_iter().map(|(_, p)| p).collect(), report)
}

/// Parse a JSON payload: either a bare array of records or an object wrapping one
/// under `priceHistory`, `history` or `data`.
pub fn parse_json(text: &str) -> Result<Vec<RawPriceRecord>> {
    let value: Value = serde_json::from_str(text)?;
    let array = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => ENVELOPE_KEYS
            .iter()
            .find_map(|k| map.remove(*k).filter(Value::is_array))
            .ok_or_else(|| HistoryError::Payload(format!("expected an array under one of {ENVELOPE_KEYS:?}")))?,
        other => return Err(HistoryError::Payload(format!("expected array or object, got {other}"))),
    };
    Ok(serde_json::from_value(array)?)
}

/// Read records from CSV with a header row. Column names are matched case-insensitively.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<RawPriceRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_date = idx(DATE_COLUMNS).ok_or(HistoryError::MissingColumn { expected: DATE_COLUMNS })?;
    let i_price = idx(PRICE_COLUMNS).ok_or(HistoryError::MissingColumn { expected: PRICE_COLUMNS })?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = rec.get(i_date).filter(|s| !s.is_empty()).map(|s| RawDate::Text(s.to_string()));
        let price = rec.get(i_price).and_then(|s| s.parse::<f64>().ok());
        out.push(RawPriceRecord { date, price });
    }
    Ok(out)
}

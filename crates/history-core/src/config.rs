// File: crates/history-core/src/config.rs
// Summary: Options for ingesting and plotting a price history, with env overrides.

use crate::error::{HistoryError, Result};

/// Price value the backend uses for "no observation".
pub const INVALID_PRICE_SENTINEL: f64 = -1.0;
/// Default plotting budget for the product-page chart.
pub const DEFAULT_MAX_POINTS: usize = 50;

/// How raw backend records are turned into points.
/// Contract: `price_divisor` is finite and > 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IngestOptions {
    pub sentinel: f64,
    pub price_divisor: f64,
    pub round_decimals: u32,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { sentinel: INVALID_PRICE_SENTINEL, price_divisor: 1.0, round_decimals: 2 }
    }
}

impl IngestOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.price_divisor.is_finite() && self.price_divisor > 0.0) {
            return Err(HistoryError::InvalidConfig {
                key: "price_divisor",
                value: self.price_divisor.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryOptions {
    pub max_points: usize,
    pub ingest: IngestOptions,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self { max_points: DEFAULT_MAX_POINTS, ingest: IngestOptions::default() }
    }
}

impl HistoryOptions {
    /// Defaults overridden by `HISTORY_MAX_POINTS`, `HISTORY_SENTINEL`,
    /// `HISTORY_PRICE_DIVISOR` and `HISTORY_ROUND_DECIMALS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut opts = Self::default();
        if let Some(v) = parse_var(&lookup, "HISTORY_MAX_POINTS")? {
            opts.max_points = v;
        }
        if let Some(v) = parse_var(&lookup, "HISTORY_SENTINEL")? {
            opts.ingest.sentinel = v;
        }
        if let Some(v) = parse_var(&lookup, "HISTORY_PRICE_DIVISOR")? {
            opts.ingest.price_divisor = v;
        }
        if let Some(v) = parse_var(&lookup, "HISTORY_ROUND_DECIMALS")? {
            opts.ingest.round_decimals = v;
        }
        opts.ingest.validate()?;
        Ok(opts)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| HistoryError::InvalidConfig { key, value: raw }),
    }
}

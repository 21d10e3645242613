// File: crates/history-core/src/types.rs
// Summary: Shared types (price observations) passed between ingestion, downsampling and the chart.

use serde::{Deserialize, Serialize};

/// One price observation.
/// Contract: `time` is milliseconds since the Unix epoch when present; labels are opaque payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_date: Option<String>,
}

impl PricePoint {
    /// Timestamped point without display labels.
    pub fn new(time_ms: i64, price: f64) -> Self {
        Self { time: Some(time_ms), price, label: None, full_date: None }
    }

    /// Point with no timestamp; its position in the series stands in for X.
    pub fn untimed(price: f64) -> Self {
        Self { time: None, price, label: None, full_date: None }
    }

    pub fn with_labels(mut self, label: impl Into<String>, full_date: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self.full_date = Some(full_date.into());
        self
    }

    pub fn has_finite_price(&self) -> bool { self.price.is_finite() }
}

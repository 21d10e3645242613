// File: crates/history-core/src/trend.rs
// Summary: Price trend summary shown next to the history chart ("price has dropped by ...").

use crate::format::format_inr;
use crate::series::Series;

/// Changes smaller than half a paisa count as flat.
const FLAT_EPSILON: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendDirection {
    Dropped,
    Rose,
    Flat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceTrend {
    pub first: f64,
    pub last: f64,
    pub lowest: f64,
    pub highest: f64,
    /// `last - first`.
    pub change: f64,
    /// Change relative to `first`, in percent. None when `first` is zero.
    pub change_pct: Option<f64>,
    /// Time between the first and last timed points.
    pub span_ms: Option<i64>,
    /// Display label of the first point, used as "since ...".
    pub since_label: Option<String>,
}

impl PriceTrend {
    /// Summarize the finite-priced points of `series`; None when there are none.
    pub fn from_series(series: &Series) -> Option<Self> {
        let mut finite = series.iter().filter(|p| p.has_finite_price());
        let head = finite.next()?;
        let mut tail = head;
        let mut lowest = head.price;
        let mut highest = head.price;
        for p in finite {
            lowest = lowest.min(p.price);
            highest = highest.max(p.price);
            tail = p;
        }

        let change = tail.price - head.price;
        let change_pct = if head.price != 0.0 { Some(change / head.price.abs() * 100.0) } else { None };
        let first_t = series.iter().find_map(|p| p.time);
        let last_t = series.iter().rev().find_map(|p| p.time);
        let span_ms = match (first_t, last_t) {
            (Some(a), Some(b)) => b.checked_sub(a),
            _ => None,
        };

        Some(Self {
            first: head.price,
            last: tail.price,
            lowest,
            highest,
            change,
            change_pct,
            span_ms,
            since_label: head.label.clone(),
        })
    }

    pub fn direction(&self) -> TrendDirection {
        if self.change <= -FLAT_EPSILON {
            TrendDirection::Dropped
        } else if self.change >= FLAT_EPSILON {
            TrendDirection::Rose
        } else {
            TrendDirection::Flat
        }
    }

    /// Latest price is the lowest of the period.
    pub fn is_lowest_now(&self) -> bool { self.last - self.lowest < FLAT_EPSILON }

    pub fn headline(&self) -> String {
        let since = self.since_label.as_deref().map(|l| format!(" since {l}")).unwrap_or_default();
        match self.direction() {
            TrendDirection::Dropped => format!(
                "Price has dropped by {}{since}. Great time to buy!",
                format_inr(self.change.abs())
            ),
            TrendDirection::Rose => format!("Price has risen by {}{since}.", format_inr(self.change)),
            TrendDirection::Flat => format!("Price has held steady at {}{since}.", format_inr(self.last)),
        }
    }
}

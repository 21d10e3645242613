// File: crates/history-core/src/series.rs
// Summary: Ordered price series model with downsampling, sanitizing and summary helpers.
// Notes:
// - A Series never reorders its points; every transform yields a new Series
//   whose points are a subsequence of the source.

use serde::{Deserialize, Serialize};

use crate::downsample::lttb;
use crate::trend::PriceTrend;
use crate::types::PricePoint;

/// How many points of a series carry a timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeCoverage {
    /// Every point has a time (or the series is empty).
    Full,
    /// Some do, some don't: timestamps and index fallbacks get mixed on X.
    Partial,
    /// No point has a time; X is the index throughout.
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    pub fn new(points: Vec<PricePoint>) -> Self { Self { points } }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn points(&self) -> &[PricePoint] { &self.points }
    pub fn into_points(self) -> Vec<PricePoint> { self.points }
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> { self.points.iter() }
    pub fn first(&self) -> Option<&PricePoint> { self.points.first() }
    pub fn last(&self) -> Option<&PricePoint> { self.points.last() }

    /// Downsample using LTTB to at most `threshold` points.
    pub fn downsample_lttb(&self, threshold: usize) -> Self {
        Self { points: lttb(&self.points, threshold) }
    }

    /// Copy without points whose price is NaN or infinite.
    pub fn sanitized(&self) -> Self {
        self.points.iter().filter(|p| p.has_finite_price()).cloned().collect()
    }

    /// True when present timestamps never decrease. Untimed points are skipped.
    pub fn is_chronological(&self) -> bool {
        let mut prev: Option<i64> = None;
        for t in self.points.iter().filter_map(|p| p.time) {
            if let Some(p) = prev {
                if t < p { return false; }
            }
            prev = Some(t);
        }
        true
    }

    pub fn time_coverage(&self) -> TimeCoverage {
        let timed = self.points.iter().filter(|p| p.time.is_some()).count();
        if timed == self.points.len() {
            TimeCoverage::Full
        } else if timed == 0 {
            TimeCoverage::None
        } else {
            TimeCoverage::Partial
        }
    }

    /// (min, max) price, ignoring non-finite values.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for p in self.points.iter().filter(|p| p.has_finite_price()) {
            lo = lo.min(p.price);
            hi = hi.max(p.price);
        }
        if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
    }

    pub fn trend(&self) -> Option<PriceTrend> { PriceTrend::from_series(self) }
}

impl From<Vec<PricePoint>> for Series {
    fn from(points: Vec<PricePoint>) -> Self { Self::new(points) }
}

impl FromIterator<PricePoint> for Series {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;
    fn into_iter(self) -> Self::IntoIter { self.points.iter() }
}

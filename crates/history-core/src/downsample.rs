// File: crates/history-core/src/downsample.rs
// Summary: Largest-Triangle-Three-Buckets downsampling over price series and plain XY pairs.

use crate::types::PricePoint;

/// A plottable observation. `x` may be absent; the downsampler then uses the
/// point's index in the input slice.
pub trait Sample {
    fn x(&self) -> Option<f64>;
    fn y(&self) -> f64;
}

impl Sample for PricePoint {
    #[inline]
    fn x(&self) -> Option<f64> { self.time.map(|t| t as f64) }
    #[inline]
    fn y(&self) -> f64 { self.price }
}

impl Sample for (f64, f64) {
    #[inline]
    fn x(&self) -> Option<f64> { Some(self.0) }
    #[inline]
    fn y(&self) -> f64 { self.1 }
}

#[inline]
fn x_at<T: Sample>(data: &[T], i: usize) -> f64 {
    data[i].x().unwrap_or(i as f64)
}

/// Area of the triangle (a, b, c) via the cross product magnitude.
#[inline]
pub fn triangle_area(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    0.5 * ((a.0 - c.0) * (b.1 - a.1) - (a.0 - b.0) * (c.1 - a.1)).abs()
}

/// Indices selected by LTTB, ascending.
///
/// Pass-through (all indices) when `data` is empty, `threshold == 0` or
/// `threshold >= data.len()`. Otherwise exactly `threshold` indices, the first
/// being `0` and the last `n - 1`. A threshold of 1 keeps only the first point.
pub fn lttb_indices<T: Sample>(data: &[T], threshold: usize) -> Vec<usize> {
    let n = data.len();
    if n == 0 || threshold == 0 || threshold >= n {
        return (0..n).collect();
    }
    if threshold == 1 {
        return vec![0];
    }

    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(0);

    // Interior buckets exclude the fixed first and last points.
    let buckets = threshold - 2;
    let bucket_size = (n - 2) as f64 / buckets.max(1) as f64;
    let edge = |k: usize| (k as f64 * bucket_size).floor() as usize + 1;

    let mut a = 0usize;
    for i in 0..buckets {
        // Average of the bucket after the one we are choosing from.
        let avg_start = edge(i + 1).min(n - 1);
        let avg_end = edge(i + 2).min(n);
        let avg_len = avg_end.saturating_sub(avg_start).max(1);
        let mut avg_x = 0.0f64;
        let mut avg_y = 0.0f64;
        for k in avg_start..avg_end {
            avg_x += x_at(data, k);
            avg_y += data[k].y();
        }
        avg_x /= avg_len as f64;
        avg_y /= avg_len as f64;

        let range_offs = edge(i).min(n - 2);
        let range_to = edge(i + 1).min(n - 1);

        let pa = (x_at(data, a), data[a].y());
        let mut max_area = -1.0f64;
        let mut next_a = range_offs;
        for j in range_offs..range_to {
            let area = triangle_area(pa, (x_at(data, j), data[j].y()), (avg_x, avg_y));
            // Strict comparison: the first maximal candidate wins; NaN never wins.
            if area > max_area {
                max_area = area;
                next_a = j;
            }
        }

        sampled.push(next_a);
        a = next_a;
    }

    sampled.push(n - 1);
    sampled
}

/// Largest-Triangle-Three-Buckets downsampling.
/// Returns the input unchanged when no reduction applies, else exactly `threshold` points
/// picked from `data` in their original order.
pub fn lttb<T: Sample + Clone>(data: &[T], threshold: usize) -> Vec<T> {
    if data.is_empty() || threshold == 0 || threshold >= data.len() {
        return data.to_vec();
    }
    lttb_indices(data, threshold).into_iter().map(|i| data[i].clone()).collect()
}

/// LTTB over plain `(x, y)` pairs.
pub fn lttb_xy(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    lttb(points, threshold)
}

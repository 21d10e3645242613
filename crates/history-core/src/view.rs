// File: crates/history-core/src/view.rs
// Viewport state for the history chart: pixel width follows point count and zoom.

/// Multiplicative step applied by one zoom in/out action.
pub const ZOOM_STEP: f64 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartViewport {
    pub px_per_point: f64,
    pub zoom: f64,
    pub min_width_px: u32,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ChartViewport {
    fn default() -> Self {
        Self { px_per_point: 12.0, zoom: 1.0, min_width_px: 320, min_zoom: 0.25, max_zoom: 8.0 }
    }
}

impl ChartViewport {
    /// Rendered width for `point_count` points at the current zoom.
    pub fn width_for(&self, point_count: usize) -> u32 {
        let w = (point_count as f64 * self.px_per_point * self.zoom).round();
        let w = if w.is_finite() { w.clamp(0.0, u32::MAX as f64) as u32 } else { 0 };
        w.max(self.min_width_px)
    }

    /// How many points fit in `width_px` at the current zoom (at least 2 for a line).
    pub fn point_budget(&self, width_px: u32) -> usize {
        let per = (self.px_per_point * self.zoom).max(f64::EPSILON);
        ((width_px as f64 / per).floor() as usize).max(2)
    }

    pub fn zoom_in(&mut self) { self.set_zoom(self.zoom * ZOOM_STEP); }
    pub fn zoom_out(&mut self) { self.set_zoom(self.zoom / ZOOM_STEP); }
    pub fn reset(&mut self) {
        let (lo, hi) = self.zoom_bounds();
        self.zoom = 1.0f64.clamp(lo, hi);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            let (lo, hi) = self.zoom_bounds();
            self.zoom = zoom.clamp(lo, hi);
        }
    }

    /// `(min_zoom, max_zoom)` in ascending order; a non-finite bound falls back to the default.
    pub fn zoom_bounds(&self) -> (f64, f64) {
        let d = Self::default();
        let lo = if self.min_zoom.is_finite() { self.min_zoom } else { d.min_zoom };
        let hi = if self.max_zoom.is_finite() { self.max_zoom } else { d.max_zoom };
        (lo.min(hi), lo.max(hi))
    }
}

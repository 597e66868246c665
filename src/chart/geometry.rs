//! Geometry mapping: price samples to pixel coordinates.

use crate::models::Series;

use super::error::ChartError;

/// Fixed pixel margins around the plot area.
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// The drawable region inside the margins.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Compute the plot area for a canvas, failing when the margins leave
    /// no room to draw.
    pub fn new(canvas_width: u32, canvas_height: u32, margins: &Margins) -> Result<Self, ChartError> {
        let plot_width = canvas_width as i64 - margins.left as i64 - margins.right as i64;
        let plot_height = canvas_height as i64 - margins.top as i64 - margins.bottom as i64;
        if plot_width <= 0 || plot_height <= 0 {
            return Err(ChartError::DegenerateCanvas {
                width: canvas_width,
                height: canvas_height,
                plot_width,
                plot_height,
            });
        }
        Ok(PlotArea {
            left: margins.left as f64,
            top: margins.top as f64,
            width: plot_width as f64,
            height: plot_height as f64,
        })
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Closed price interval shared by every series on one chart.
#[derive(Debug, Clone, Copy)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Min/max close over all given series, so comparison charts share one
    /// vertical scale. Errors when there are no series or all are empty.
    pub fn of(series: &[Series]) -> Result<Self, ChartError> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in series {
            for close in s.closes() {
                min = min.min(close);
                max = max.max(close);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::EmptyInput);
        }
        Ok(PriceRange { min, max })
    }

    /// Map a close into [0, 1]. A flat series has no span to divide by, so
    /// it pins to mid-scale instead of producing NaN.
    pub fn normalize(&self, close: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.5
        } else {
            (close - self.min) / span
        }
    }

    /// Price at horizontal gridline `i` of `grid_count` intervals, counted
    /// from the top of the plot.
    pub fn gridline_price(&self, i: usize, grid_count: usize) -> f64 {
        self.max - (self.max - self.min) * (i as f64 / grid_count as f64)
    }
}

/// A price sample translated into pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub struct MappedPoint {
    pub x: f64,
    pub y: f64,
    pub close: f64,
}

/// Map every point of a series into the plot area, preserving input order.
///
/// Point `i` of `n` lands at an even horizontal step; a single-point series
/// sits at the left edge (no step to divide by). Vertical position comes
/// from the normalized close, y growing downward.
pub fn map_series(series: &Series, range: &PriceRange, plot: &PlotArea) -> Result<Vec<MappedPoint>, ChartError> {
    let n = series.points.len();
    if n == 0 {
        return Err(ChartError::EmptyInput);
    }
    let step = if n > 1 { plot.width / (n - 1) as f64 } else { 0.0 };
    let mapped = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = plot.left + step * i as f64;
            let y = plot.top + plot.height - range.normalize(p.close) * plot.height;
            MappedPoint { x, y, close: p.close }
        })
        .collect();
    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;

    fn series_of(closes: &[f64]) -> Series {
        Series::new(None, closes.iter().map(|&c| PricePoint::from_close(c)).collect())
    }

    fn plot() -> PlotArea {
        PlotArea::new(800, 400, &crate::chart::style::LINE_CHART_MARGINS).unwrap()
    }

    #[test]
    fn test_one_mapped_point_per_input_point() {
        let series = series_of(&[100.0, 105.0, 102.0, 110.0]);
        let range = PriceRange::of(std::slice::from_ref(&series)).unwrap();
        let mapped = map_series(&series, &range, &plot()).unwrap();
        assert_eq!(mapped.len(), series.points.len());
    }

    #[test]
    fn test_mapped_y_stays_inside_plot() {
        let series = series_of(&[100.0, 250.0, 80.0, 310.0, 95.0]);
        let range = PriceRange::of(std::slice::from_ref(&series)).unwrap();
        let plot = plot();
        let mapped = map_series(&series, &range, &plot).unwrap();
        for p in &mapped {
            assert!(p.y >= plot.top - 1e-9, "y {} above plot top", p.y);
            assert!(p.y <= plot.bottom() + 1e-9, "y {} below plot bottom", p.y);
        }
        // extremes land exactly on the plot edges
        let max_point = mapped.iter().find(|p| p.close == 310.0).unwrap();
        let min_point = mapped.iter().find(|p| p.close == 80.0).unwrap();
        assert!((max_point.y - plot.top).abs() < 1e-9);
        assert!((min_point.y - plot.bottom()).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series_maps_to_mid_plot() {
        let series = series_of(&[200.0, 200.0, 200.0]);
        let range = PriceRange::of(std::slice::from_ref(&series)).unwrap();
        let plot = plot();
        let mapped = map_series(&series, &range, &plot).unwrap();
        let mid = plot.top + plot.height / 2.0;
        for p in &mapped {
            assert!(p.y.is_finite());
            assert!((p.y - mid).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_point_lands_on_left_edge() {
        let series = series_of(&[123.0]);
        let range = PriceRange::of(std::slice::from_ref(&series)).unwrap();
        let plot = plot();
        let mapped = map_series(&series, &range, &plot).unwrap();
        assert_eq!(mapped.len(), 1);
        assert!(mapped[0].x.is_finite());
        assert!((mapped[0].x - plot.left).abs() < 1e-9);
    }

    #[test]
    fn test_order_is_preserved() {
        let closes = [5.0, 1.0, 9.0, 3.0];
        let series = series_of(&closes);
        let range = PriceRange::of(std::slice::from_ref(&series)).unwrap();
        let mapped = map_series(&series, &range, &plot()).unwrap();
        for (m, c) in mapped.iter().zip(closes.iter()) {
            assert_eq!(m.close, *c);
        }
        for pair in mapped.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn test_shared_range_spans_all_series() {
        let a = series_of(&[100.0, 120.0]);
        let b = series_of(&[80.0, 95.0]);
        let range = PriceRange::of(&[a, b]).unwrap();
        assert_eq!(range.min, 80.0);
        assert_eq!(range.max, 120.0);
    }

    #[test]
    fn test_degenerate_canvas_is_rejected() {
        let err = PlotArea::new(100, 100, &crate::chart::style::LINE_CHART_MARGINS).unwrap_err();
        assert!(matches!(err, ChartError::DegenerateCanvas { .. }));
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let empty = Series::new(None, Vec::new());
        assert!(matches!(PriceRange::of(std::slice::from_ref(&empty)), Err(ChartError::EmptyInput)));
    }
}

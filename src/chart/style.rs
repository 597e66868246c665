//! Fixed styling tables for chart rendering.
//!
//! None of these are runtime-tunable; callers only choose canvas size.

use super::geometry::Margins;

/// Line/fill color when the series closed at or above its first price
pub const POSITIVE_COLOR: &str = "#10B981";
/// Line/fill color when the series closed below its first price
pub const NEGATIVE_COLOR: &str = "#EF4444";

/// Comparison-mode series colors, assigned by series index modulo length
pub const SERIES_PALETTE: [&str; 6] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#06B6D4",
];

pub const BACKGROUND_COLOR: &str = "#FFFFFF";
pub const GRID_COLOR: &str = "#E5E7EB";
pub const GRID_OPACITY: f64 = 0.8;
pub const BORDER_COLOR: &str = "#9CA3AF";
pub const TITLE_COLOR: &str = "#1F2937";
pub const LABEL_COLOR: &str = "#374151";

/// Number of horizontal grid intervals; gridline count is GRID_COUNT + 1
pub const GRID_COUNT: usize = 5;
/// Cap on vertical date gridlines
pub const MAX_DATE_LABELS: usize = 8;

pub const LINE_WIDTH: f64 = 3.0;
pub const MARKER_RADIUS: f64 = 4.0;
pub const COMPARISON_LINE_WIDTH: f64 = 2.0;
pub const COMPARISON_MARKER_RADIUS: f64 = 2.0;

/// Area-fill gradient opacity, top of the plot down to the baseline
pub const AREA_OPACITY_TOP: f64 = 0.3;
pub const AREA_OPACITY_BOTTOM: f64 = 0.1;

pub const FONT_FAMILY: &str = "'Noto Sans CJK JP', 'Hiragino Sans', Arial, sans-serif";
pub const TITLE_FONT_SIZE: f64 = 20.0;
pub const COMPARISON_TITLE_FONT_SIZE: f64 = 18.0;
pub const AXIS_FONT_SIZE: f64 = 11.0;
pub const LEGEND_FONT_SIZE: f64 = 12.0;
pub const CHANGE_FONT_SIZE: f64 = 14.0;
pub const CURRENT_PRICE_FONT_SIZE: f64 = 12.0;

pub const LINE_CHART_MARGINS: Margins = Margins {
    top: 80,
    right: 40,
    bottom: 60,
    left: 100,
};

/// Extra top margin reserves room for the horizontal legend
pub const COMPARISON_MARGINS: Margins = Margins {
    top: 120,
    right: 40,
    bottom: 60,
    left: 100,
};

pub const LEGEND_ORIGIN_X: f64 = 50.0;
pub const LEGEND_Y: f64 = 60.0;
pub const LEGEND_ENTRY_WIDTH: f64 = 120.0;
pub const LEGEND_SWATCH_LENGTH: f64 = 20.0;

/// Raster scale over the 72 dpi SVG default, for crisper text
pub const RASTER_SCALE: f32 = 2.0;

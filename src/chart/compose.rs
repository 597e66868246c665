//! Scene composition: turn mapped geometry into a complete drawable scene.

use chrono::{DateTime, Datelike, FixedOffset, Utc};

use crate::models::{PricePoint, Series};
use crate::utils::{format_currency, format_percent, format_signed_currency};

use super::error::ChartError;
use super::geometry::{map_series, MappedPoint, PlotArea, PriceRange};
use super::scene::{
    polyline, FontWeight, GradientDef, Paint, PathCommand, SceneNode, Stroke, TextAnchor,
    VectorScene,
};
use super::style::*;

/// X-axis label for one sample: a calendar date when the point carries a
/// timestamp, otherwise an ordinal day number.
#[derive(Debug, Clone, Copy)]
pub enum DateLabel {
    Calendar(DateTime<Utc>),
    Ordinal(usize),
}

impl DateLabel {
    pub fn for_point(point: &PricePoint, index: usize) -> Self {
        match point.timestamp {
            Some(ts) => DateLabel::Calendar(ts),
            None => DateLabel::Ordinal(index),
        }
    }
}

impl std::fmt::Display for DateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateLabel::Calendar(ts) => {
                // market-local (JST) month/day
                let jst = ts.with_timezone(&jst_offset());
                write!(f, "{}/{}", jst.month(), jst.day())
            }
            DateLabel::Ordinal(index) => write!(f, "Day {}", index + 1),
        }
    }
}

fn jst_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid JST offset")
}

fn trend_color(first: f64, last: f64) -> &'static str {
    if last >= first {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

fn background(width: u32, height: u32) -> SceneNode {
    SceneNode::Rect {
        x: 0.0,
        y: 0.0,
        width: width as f64,
        height: height as f64,
        fill: Some(Paint::color(BACKGROUND_COLOR)),
        stroke: None,
    }
}

fn title_text(content: &str, width: u32, y: f64, size: f64) -> SceneNode {
    SceneNode::Text {
        x: width as f64 / 2.0,
        y,
        content: content.to_string(),
        anchor: TextAnchor::Middle,
        size,
        weight: FontWeight::Bold,
        color: TITLE_COLOR.to_string(),
    }
}

fn plot_border(plot: &PlotArea) -> SceneNode {
    SceneNode::Rect {
        x: plot.left,
        y: plot.top,
        width: plot.width,
        height: plot.height,
        fill: None,
        stroke: Some(Stroke::new(BORDER_COLOR, 2.0)),
    }
}

/// Horizontal gridlines plus their interpolated price labels, shared by
/// both chart modes.
fn push_price_grid(scene: &mut VectorScene, plot: &PlotArea, range: &PriceRange) {
    let mut lines = Vec::with_capacity(GRID_COUNT + 1);
    let mut labels = Vec::with_capacity(GRID_COUNT + 1);
    for i in 0..=GRID_COUNT {
        let y = plot.top + (plot.height / GRID_COUNT as f64) * i as f64;
        lines.push(SceneNode::Line {
            x1: plot.left,
            y1: y,
            x2: plot.right(),
            y2: y,
            stroke: Stroke::new(GRID_COLOR, 1.0),
        });
        labels.push(SceneNode::Text {
            x: plot.left - 10.0,
            y: y + 4.0,
            content: format_currency(range.gridline_price(i, GRID_COUNT)),
            anchor: TextAnchor::End,
            size: AXIS_FONT_SIZE,
            weight: FontWeight::Normal,
            color: LABEL_COLOR.to_string(),
        });
    }
    scene.push(SceneNode::Group {
        stroke: None,
        opacity: Some(GRID_OPACITY),
        children: lines,
    });
    for label in labels {
        scene.push(label);
    }
}

/// Vertical gridlines at up to [`MAX_DATE_LABELS`] evenly spaced sample
/// indices, each labeled by date or ordinal day.
fn push_date_grid(scene: &mut VectorScene, plot: &PlotArea, points: &[PricePoint]) {
    let n = points.len();
    let label_count = n.min(MAX_DATE_LABELS);
    let mut lines = Vec::with_capacity(label_count);
    let mut labels = Vec::with_capacity(label_count);
    for i in 0..label_count {
        // a single sample collapses to one gridline at the left edge
        let (data_index, x) = if label_count > 1 {
            (
                (n - 1) * i / (label_count - 1),
                plot.left + (plot.width / (label_count - 1) as f64) * i as f64,
            )
        } else {
            (0, plot.left)
        };
        lines.push(SceneNode::Line {
            x1: x,
            y1: plot.top,
            x2: x,
            y2: plot.bottom(),
            stroke: Stroke::new(GRID_COLOR, 1.0),
        });
        labels.push(SceneNode::Text {
            x,
            y: plot.bottom() + 25.0,
            content: DateLabel::for_point(&points[data_index], data_index).to_string(),
            anchor: TextAnchor::Middle,
            size: AXIS_FONT_SIZE,
            weight: FontWeight::Normal,
            color: LABEL_COLOR.to_string(),
        });
    }
    scene.push(SceneNode::Group {
        stroke: None,
        opacity: Some(GRID_OPACITY),
        children: lines,
    });
    for label in labels {
        scene.push(label);
    }
}

fn area_commands(mapped: &[MappedPoint], baseline: f64) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(mapped.len() + 3);
    commands.push(PathCommand::MoveTo(mapped[0].x, baseline));
    for p in mapped {
        commands.push(PathCommand::LineTo(p.x, p.y));
    }
    commands.push(PathCommand::LineTo(mapped[mapped.len() - 1].x, baseline));
    commands.push(PathCommand::Close);
    commands
}

/// Build the single-series line chart scene: trend-colored line over a
/// gradient area fill, with price and date axes and change annotations.
pub fn compose_line_chart(
    series: &Series,
    title: &str,
    width: u32,
    height: u32,
) -> Result<VectorScene, ChartError> {
    if series.points.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let plot = PlotArea::new(width, height, &LINE_CHART_MARGINS)?;
    let range = PriceRange::of(std::slice::from_ref(series))?;
    let mapped = map_series(series, &range, &plot)?;

    let first = mapped[0].close;
    let last = mapped[mapped.len() - 1].close;
    let color = trend_color(first, last);

    let mut scene = VectorScene::new(width, height);
    scene.define_gradient(GradientDef {
        id: "areaGradient".to_string(),
        color: color.to_string(),
        top_opacity: AREA_OPACITY_TOP,
        bottom_opacity: AREA_OPACITY_BOTTOM,
    });

    scene.push(background(width, height));
    scene.push(title_text(title, width, 40.0, TITLE_FONT_SIZE));

    push_price_grid(&mut scene, &plot, &range);
    push_date_grid(&mut scene, &plot, &series.points);
    scene.push(plot_border(&plot));

    scene.push(SceneNode::Path {
        commands: area_commands(&mapped, plot.bottom()),
        fill: Some(Paint::GradientRef("areaGradient".to_string())),
        stroke: None,
    });
    scene.push(SceneNode::Path {
        commands: polyline(mapped.iter().map(|p| (p.x, p.y))),
        fill: None,
        stroke: Some(Stroke::new(color, LINE_WIDTH)),
    });
    for p in &mapped {
        scene.push(SceneNode::Circle {
            cx: p.x,
            cy: p.y,
            r: MARKER_RADIUS,
            fill: Paint::color(color),
            stroke: Some(Stroke::new("#FFFFFF", 2.0)),
        });
    }

    let change = last - first;
    let change_percent = change / first * 100.0;
    scene.push(SceneNode::Text {
        x: width as f64 - 20.0,
        y: 60.0,
        content: format!(
            "{} ({})",
            format_signed_currency(change),
            format_percent(change_percent)
        ),
        anchor: TextAnchor::End,
        size: CHANGE_FONT_SIZE,
        weight: FontWeight::Bold,
        color: color.to_string(),
    });
    scene.push(SceneNode::Text {
        x: width as f64 - 20.0,
        y: 80.0,
        content: format!("現在価格: {}", format_currency(last)),
        anchor: TextAnchor::End,
        size: CURRENT_PRICE_FONT_SIZE,
        weight: FontWeight::Normal,
        color: LABEL_COLOR.to_string(),
    });

    Ok(scene)
}

fn legend_label(series: &Series, index: usize) -> String {
    match &series.label {
        Some(label) if !label.is_empty() => label.clone(),
        _ => format!("Series {}", index + 1),
    }
}

/// Color for the series at `index`, cycling through the fixed palette.
/// The assignment depends only on the index, never on the other series.
pub fn series_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Build the multi-series comparison scene: one shared price scale, a
/// horizontal legend, and an independently spaced polyline per series.
pub fn compose_comparison_chart(
    series_list: &[Series],
    title: &str,
    width: u32,
    height: u32,
) -> Result<VectorScene, ChartError> {
    if series_list.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let plot = PlotArea::new(width, height, &COMPARISON_MARGINS)?;
    let range = PriceRange::of(series_list)?;

    let mut scene = VectorScene::new(width, height);
    scene.push(background(width, height));
    scene.push(title_text(title, width, 30.0, COMPARISON_TITLE_FONT_SIZE));

    for (i, series) in series_list.iter().enumerate() {
        let x = LEGEND_ORIGIN_X + i as f64 * LEGEND_ENTRY_WIDTH;
        scene.push(SceneNode::Line {
            x1: x,
            y1: LEGEND_Y,
            x2: x + LEGEND_SWATCH_LENGTH,
            y2: LEGEND_Y,
            stroke: Stroke::new(series_color(i), 3.0),
        });
        scene.push(SceneNode::Text {
            x: x + LEGEND_SWATCH_LENGTH + 5.0,
            y: LEGEND_Y + 4.0,
            content: legend_label(series, i),
            anchor: TextAnchor::Start,
            size: LEGEND_FONT_SIZE,
            weight: FontWeight::Normal,
            color: LABEL_COLOR.to_string(),
        });
    }

    push_price_grid(&mut scene, &plot, &range);
    scene.push(plot_border(&plot));

    // Series of differing lengths keep their own horizontal spacing: each
    // spans the full plot width, sharing only the price scale.
    for (i, series) in series_list.iter().enumerate() {
        let color = series_color(i);
        let mapped = map_series(series, &range, &plot)?;
        scene.push(SceneNode::Path {
            commands: polyline(mapped.iter().map(|p| (p.x, p.y))),
            fill: None,
            stroke: Some(Stroke::new(color, COMPARISON_LINE_WIDTH)),
        });
        for p in &mapped {
            scene.push(SceneNode::Circle {
                cx: p.x,
                cy: p.y,
                r: COMPARISON_MARKER_RADIUS,
                fill: Paint::color(color),
                stroke: None,
            });
        }
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series_of(closes: &[f64]) -> Series {
        Series::new(
            None,
            closes.iter().map(|&c| PricePoint::from_close(c)).collect(),
        )
    }

    fn stroked_path_colors(scene: &VectorScene) -> Vec<String> {
        scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Path {
                    stroke: Some(s), ..
                } => Some(s.color.clone()),
                _ => None,
            })
            .collect()
    }

    fn texts(scene: &VectorScene) -> Vec<String> {
        scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_falling_series_uses_negative_palette() {
        let scene = compose_line_chart(&series_of(&[100.0, 90.0, 80.0]), "t", 800, 400).unwrap();
        assert_eq!(stroked_path_colors(&scene), vec![NEGATIVE_COLOR.to_string()]);
    }

    #[test]
    fn test_rising_series_uses_positive_palette() {
        let scene = compose_line_chart(&series_of(&[80.0, 90.0, 100.0]), "t", 800, 400).unwrap();
        assert_eq!(stroked_path_colors(&scene), vec![POSITIVE_COLOR.to_string()]);
    }

    #[test]
    fn test_flat_series_counts_as_positive() {
        let scene = compose_line_chart(&series_of(&[100.0, 100.0]), "t", 800, 400).unwrap();
        assert_eq!(stroked_path_colors(&scene), vec![POSITIVE_COLOR.to_string()]);
    }

    #[test]
    fn test_change_annotation_rising() {
        let scene = compose_line_chart(&series_of(&[100.0, 110.0]), "t", 800, 400).unwrap();
        assert!(texts(&scene).contains(&"+¥10 (10.00%)".to_string()));
    }

    #[test]
    fn test_change_annotation_falling() {
        let scene = compose_line_chart(&series_of(&[110.0, 100.0]), "t", 800, 400).unwrap();
        assert!(texts(&scene).contains(&"-¥10 (-9.09%)".to_string()));
    }

    #[test]
    fn test_empty_series_is_a_hard_error() {
        let err = compose_line_chart(&series_of(&[]), "t", 800, 400).unwrap_err();
        assert!(matches!(err, ChartError::EmptyInput));
    }

    #[test]
    fn test_empty_comparison_is_a_hard_error() {
        let err = compose_comparison_chart(&[], "t", 800, 400).unwrap_err();
        assert!(matches!(err, ChartError::EmptyInput));
    }

    #[test]
    fn test_comparison_colors_are_index_stable() {
        let one = compose_comparison_chart(&[series_of(&[1.0, 2.0])], "t", 800, 400).unwrap();
        let three = compose_comparison_chart(
            &[
                series_of(&[1.0, 2.0]),
                series_of(&[3.0, 4.0]),
                series_of(&[5.0, 6.0]),
            ],
            "t",
            800,
            400,
        )
        .unwrap();
        assert_eq!(stroked_path_colors(&one)[0], SERIES_PALETTE[0]);
        assert_eq!(
            stroked_path_colors(&three),
            vec![SERIES_PALETTE[0], SERIES_PALETTE[1], SERIES_PALETTE[2]]
        );
    }

    #[test]
    fn test_palette_cycles_past_its_length() {
        assert_eq!(series_color(0), SERIES_PALETTE[0]);
        assert_eq!(series_color(6), SERIES_PALETTE[0]);
        assert_eq!(series_color(7), SERIES_PALETTE[1]);
    }

    #[test]
    fn test_legend_falls_back_to_ordinal() {
        let scene = compose_comparison_chart(
            &[
                Series::new(Some("7203.T".to_string()), vec![PricePoint::from_close(1.0)]),
                series_of(&[2.0]),
            ],
            "t",
            800,
            400,
        )
        .unwrap();
        let texts = texts(&scene);
        assert!(texts.contains(&"7203.T".to_string()));
        assert!(texts.contains(&"Series 2".to_string()));
    }

    #[test]
    fn test_date_label_prefers_calendar_date() {
        // 2026-08-28 00:00 UTC is 08-28 09:00 JST
        let ts = Utc.with_ymd_and_hms(2026, 8, 28, 0, 0, 0).unwrap();
        let mut point = PricePoint::from_close(1.0);
        point.timestamp = Some(ts);
        assert_eq!(DateLabel::for_point(&point, 4).to_string(), "8/28");
    }

    #[test]
    fn test_date_label_falls_back_to_ordinal_day() {
        let point = PricePoint::from_close(1.0);
        assert_eq!(DateLabel::for_point(&point, 2).to_string(), "Day 3");
    }

    #[test]
    fn test_date_label_uses_market_local_day() {
        // 2026-08-28 23:00 UTC is already 08-29 in JST
        let ts = Utc.with_ymd_and_hms(2026, 8, 28, 23, 0, 0).unwrap();
        let mut point = PricePoint::from_close(1.0);
        point.timestamp = Some(ts);
        assert_eq!(DateLabel::for_point(&point, 0).to_string(), "8/29");
    }

    #[test]
    fn test_price_grid_has_grid_count_plus_one_lines() {
        let scene = compose_line_chart(&series_of(&[1.0, 2.0]), "t", 800, 400).unwrap();
        let grid_lines: usize = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Group { children, .. } => Some(
                    children
                        .iter()
                        .filter(|c| matches!(c, SceneNode::Line { .. }))
                        .count(),
                ),
                _ => None,
            })
            .next()
            .unwrap();
        assert_eq!(grid_lines, GRID_COUNT + 1);
    }

    #[test]
    fn test_single_point_series_composes() {
        let scene = compose_line_chart(&series_of(&[100.0]), "t", 800, 400).unwrap();
        let markers = scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Circle { .. }))
            .count();
        assert_eq!(markers, 1);
    }
}

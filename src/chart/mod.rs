//! Chart rendering engine.
//!
//! Converts timestamped price observations into a vector scene and
//! rasterizes it to a PNG buffer. Stateless per call: the renderer holds
//! only its canvas dimensions, so one instance can serve concurrent
//! renders without locking.

pub mod compose;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod style;
pub mod svg;

use tokio::task;
use tracing::debug;

use crate::models::Series;

pub use error::{ChartError, RasterError};

/// Renders price series onto a fixed-size canvas.
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        ChartRenderer { width, height }
    }

    /// Render a single series as a trend-colored line chart with an area
    /// fill, returning PNG bytes.
    pub async fn render_line_chart(&self, series: &Series, title: &str) -> Result<Vec<u8>, ChartError> {
        debug!("rendering line chart '{}' ({} points)", title, series.points.len());
        let scene = compose::compose_line_chart(series, title, self.width, self.height)?;
        self.rasterize(scene).await
    }

    /// Render several series on one shared price scale, returning PNG bytes.
    pub async fn render_comparison_chart(
        &self,
        series_list: &[Series],
        title: &str,
    ) -> Result<Vec<u8>, ChartError> {
        debug!("rendering comparison chart '{}' ({} series)", title, series_list.len());
        let scene = compose::compose_comparison_chart(series_list, title, self.width, self.height)?;
        self.rasterize(scene).await
    }

    /// Serialize and rasterize on the blocking pool. This is the single
    /// async boundary of a render call.
    async fn rasterize(&self, scene: scene::VectorScene) -> Result<Vec<u8>, ChartError> {
        let markup = svg::to_svg(&scene);
        let (width, height) = (self.width, self.height);
        let png = task::spawn_blocking(move || raster::svg_to_png(&markup, width, height))
            .await
            .map_err(|e| RasterError::Panic(e.to_string()))??;
        debug!("rasterized chart: {} bytes", png.len());
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn series_of(closes: impl IntoIterator<Item = f64>) -> Series {
        Series::new(
            None,
            closes.into_iter().map(PricePoint::from_close).collect(),
        )
    }

    #[tokio::test]
    async fn test_renders_distinct_png_buffers() {
        let renderer = ChartRenderer::new(800, 400);
        let ascending = series_of((0..30).map(|i| 100.0 + i as f64));
        let descending = series_of((0..30).map(|i| 130.0 - i as f64));

        let up = renderer.render_line_chart(&ascending, "up").await.unwrap();
        let down = renderer.render_line_chart(&descending, "down").await.unwrap();

        assert!(!up.is_empty());
        assert!(!down.is_empty());
        assert_eq!(&up[..8], &PNG_SIGNATURE);
        assert_eq!(&down[..8], &PNG_SIGNATURE);
        assert_ne!(up, down);
    }

    #[tokio::test]
    async fn test_empty_series_yields_no_buffer() {
        let renderer = ChartRenderer::new(800, 400);
        let err = renderer
            .render_line_chart(&series_of([]), "empty")
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::EmptyInput));
    }

    #[tokio::test]
    async fn test_comparison_chart_renders_png() {
        let renderer = ChartRenderer::new(800, 400);
        let list = vec![
            series_of((0..10).map(|i| 100.0 + i as f64)),
            series_of((0..20).map(|i| 90.0 + (i % 5) as f64)),
        ];
        let png = renderer.render_comparison_chart(&list, "compare").await.unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[tokio::test]
    async fn test_degenerate_canvas_fails() {
        let renderer = ChartRenderer::new(120, 100);
        let err = renderer
            .render_line_chart(&series_of([1.0, 2.0]), "tiny")
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::DegenerateCanvas { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_renders_share_one_instance() {
        let renderer = std::sync::Arc::new(ChartRenderer::new(800, 400));
        let a = renderer.clone();
        let b = renderer.clone();
        let (ra, rb) = tokio::join!(
            async move { a.render_line_chart(&series_of([1.0, 2.0, 3.0]), "a").await },
            async move { b.render_line_chart(&series_of([3.0, 2.0, 1.0]), "b").await },
        );
        assert!(ra.is_ok());
        assert!(rb.is_ok());
    }
}

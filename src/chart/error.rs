/// Errors raised by the chart rendering engine.
///
/// Rendering never retries internally; each of these propagates straight to
/// the caller, which decides whether to skip the chart or retry the render.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart input is empty")]
    EmptyInput,

    #[error("plot area is degenerate: {width}x{height} canvas leaves {plot_width}x{plot_height} inside margins")]
    DegenerateCanvas {
        width: u32,
        height: u32,
        plot_width: i64,
        plot_height: i64,
    },

    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterError),
}

/// Failures inside the SVG-to-PNG conversion step.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("usvg error: {0}")]
    Usvg(#[from] usvg::Error),

    #[error("svg parse error: {0}")]
    Xml(#[from] usvg::roxmltree::Error),

    #[error("could not allocate {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("png encoding failed: {0}")]
    PngEncode(String),

    #[error("renderer panicked: {0}")]
    Panic(String),
}

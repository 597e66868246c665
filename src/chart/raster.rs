//! Rasterization: SVG markup to an opaque-white PNG buffer.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use usvg::fontdb::Database;

use super::error::RasterError;
use super::style::RASTER_SCALE;

lazy_static! {
    static ref FONT_DB: Mutex<Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    font_database
}

/// Rasterize an SVG document to PNG at `RASTER_SCALE` times its nominal
/// size. The pixmap is pre-filled with opaque white so transparency in the
/// scene never shows through as a black or transparent background.
///
/// Blocking; callers on the async runtime run this through
/// `spawn_blocking`. Any parse, allocation, encode failure or panic inside
/// usvg/resvg surfaces as a [`RasterError`]; there is no retry.
pub fn svg_to_png(svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
    let font_database = {
        let guard = FONT_DB.lock().expect("font database lock");
        guard.clone()
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let xml_opt = usvg::roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let opts = usvg::Options {
            fontdb: Arc::new(font_database),
            ..Default::default()
        };
        let doc = usvg::roxmltree::Document::parse_with_options(svg, xml_opt)?;
        let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

        let out_width = (width as f32 * RASTER_SCALE) as u32;
        let out_height = (height as f32 * RASTER_SCALE) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(out_width, out_height).ok_or(
            RasterError::PixmapAlloc {
                width: out_width,
                height: out_height,
            },
        )?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = tiny_skia::Transform::from_scale(RASTER_SCALE, RASTER_SCALE);
        resvg::render(&rtree, transform, &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|e| RasterError::PngEncode(e.to_string()))
    }));

    match result {
        Ok(png) => png,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RasterError::Panic(msg))
        }
    }
}

//! Rendering module for compositing record text onto the template.
//!
//! All drawing goes through the pure-Rust `tiny-skia` library; glyphs come
//! from `fontdb` faces shaped with `rustybuzz`.
//!
//! ## Example
//!
//! ```ignore
//! use mergeplate::rendering::RecordCompositor;
//! use mergeplate::{MergeOptions, Record, Template};
//!
//! let template = Template::open("background.jpg")?;
//! let compositor = RecordCompositor::new(MergeOptions::default());
//! let record = Record::new().with("name", "Jane");
//! let image = compositor.composite(&record, &["name".to_string()], &template)?;
//! image.save("jane.jpg")?;
//! ```
//!
//! ## Architecture
//!
//! 1. Blit the template onto a fresh canvas
//! 2. Draw each well-known slot, then the extra-field stack
//! 3. Encode the canvas as JPEG

mod compositor;
mod fonts;
mod text_rasterizer;

pub use compositor::{RecordCompositor, RenderedImage};
pub use fonts::{FontBook, FontFace};
pub use text_rasterizer::{stroke_offsets, CanvasPainter, ShapedText, TextPlacement, TextRasterizer};

use crate::layout::{Alignment, Point, TextStyle};
use tiny_skia::{Color, Paint};

/// Sink for styled text draw calls.
///
/// The compositor decides what to draw and where; a painter decides how.
pub trait TextPainter {
    /// Draw `text` at `anchor` (baseline) with the given alignment and style.
    fn draw_text(&mut self, text: &str, anchor: Point, alignment: Alignment, style: &TextStyle);
}

/// Create an anti-aliased Paint for a solid color.
pub(crate) fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

//! Text rasterizer - draws outlined text onto a canvas using tiny-skia.
//!
//! Text is shaped with `rustybuzz`, converted to a single glyph-outline path
//! in canvas pixels, then painted in two passes:
//!
//! 1. A stroke pass that paints the outline twelve times, nudged by 0, 0.5
//!    and 1 pixel in each compass direction, with round joins and caps. The
//!    overlapping strokes give a soft, rounded halo without a blur filter.
//! 2. A single fill pass at the unperturbed origin, on top of every stroke.

use super::fonts::{FontBook, FontFace};
use super::{solid_paint, TextPainter};
use crate::layout::{Alignment, FaceKey, FontSpec, Layout, Point, TextStyle};

use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use std::collections::HashMap;
use tiny_skia::{FillRule, LineCap, LineJoin, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Number of stroke iterations; each draws four offset strokes.
const STROKE_ITERATIONS: usize = 3;

/// Offset growth per stroke iteration, in pixels.
const STROKE_OFFSET_STEP: f32 = 0.5;

/// Miter limit for the stroke pass.
const STROKE_MITER_LIMIT: f32 = 2.0;

/// Offsets of every stroke draw, in draw order.
///
/// For `k` in `0, 0.5, 1.0`: left, right, up, down.
pub fn stroke_offsets() -> [(f32, f32); STROKE_ITERATIONS * 4] {
    let mut offsets = [(0.0, 0.0); STROKE_ITERATIONS * 4];
    for i in 0..STROKE_ITERATIONS {
        let k = i as f32 * STROKE_OFFSET_STEP;
        offsets[i * 4] = (-k, 0.0);
        offsets[i * 4 + 1] = (k, 0.0);
        offsets[i * 4 + 2] = (0.0, -k);
        offsets[i * 4 + 3] = (0.0, k);
    }
    offsets
}

/// Text shaped into a path whose origin is the start of the baseline.
#[derive(Debug, Clone)]
pub struct ShapedText {
    /// Glyph outlines; `None` when no glyph has ink (e.g. only spaces)
    pub path: Option<Path>,
    /// Total advance width in pixels
    pub width: f32,
}

/// Where a run of text ended up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Baseline start of the run
    pub origin: Point,
    /// Advance width of the run
    pub width: f32,
}

/// Rasterizer for styled text runs.
pub struct TextRasterizer {
    faces: HashMap<FaceKey, FontFace>,
}

impl TextRasterizer {
    /// Create a rasterizer with no faces.
    pub fn new() -> Self {
        Self {
            faces: HashMap::new(),
        }
    }

    /// Resolve every face a layout needs from `book`.
    ///
    /// Faces that cannot be resolved are logged; text in those styles is
    /// skipped at draw time.
    pub fn for_layout(book: &FontBook, layout: &Layout) -> Self {
        let mut rasterizer = Self::new();
        for font in layout.fonts() {
            let key = font.face_key();
            if rasterizer.faces.contains_key(&key) {
                continue;
            }
            match book.resolve(&key) {
                Ok(face) => {
                    rasterizer.faces.insert(key, face);
                },
                Err(e) => {
                    log::warn!(
                        "No face for {:?} weight {}: {}; text in this style will be skipped",
                        key.families,
                        key.weight,
                        e
                    );
                },
            }
        }
        rasterizer
    }

    /// Register a face for a family list and weight.
    pub fn insert_face(&mut self, key: FaceKey, face: FontFace) {
        self.faces.insert(key, face);
    }

    /// Number of distinct faces held.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether no face is held, so every draw call is skipped.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Whether a face is available for `font`.
    pub fn has_face(&self, font: &FontSpec) -> bool {
        self.faces.contains_key(&font.face_key())
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&self, text: &str, font: &FontSpec) -> Option<f32> {
        self.shape(text, font).map(|s| s.width)
    }

    /// Shape `text` into a path positioned at baseline origin (0, 0).
    pub fn shape(&self, text: &str, font: &FontSpec) -> Option<ShapedText> {
        let face = self.faces.get(&font.face_key())?.parse()?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return None;
        }
        let scale = font.size / units_per_em as f32;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let glyphs = rustybuzz::shape(&face, &[], buffer);

        let mut builder = GlyphPathBuilder::new(scale);
        let mut pen_x = 0.0;
        for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
            builder.x = pen_x + pos.x_offset as f32 * scale;
            builder.y = -(pos.y_offset as f32) * scale;
            // Glyphs without outlines (spaces) simply add nothing.
            let _ = face.outline_glyph(GlyphId(info.glyph_id as u16), &mut builder);
            pen_x += pos.x_advance as f32 * scale;
        }

        Some(ShapedText {
            path: builder.inner.finish(),
            width: pen_x,
        })
    }

    /// Draw one styled run with stroke-then-fill.
    ///
    /// Returns `None` without touching the canvas when no face is available.
    /// A stroke width of zero or less paints no outline.
    pub fn draw_text(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        anchor: Point,
        alignment: Alignment,
        style: &TextStyle,
    ) -> Option<TextPlacement> {
        let shaped = match self.shape(text, &style.font) {
            Some(shaped) => shaped,
            None => {
                log::debug!("No face for {:?}, skipping {:?}", style.font.families, text);
                return None;
            },
        };

        let origin = Point::new(alignment.origin_x(anchor.x, shaped.width), anchor.y);
        let placement = TextPlacement {
            origin,
            width: shaped.width,
        };
        let path = match shaped.path {
            Some(path) => path,
            None => return Some(placement),
        };

        if style.stroke_width.is_finite() && style.stroke_width > 0.0 {
            let paint = solid_paint(style.stroke);
            let stroke = Stroke {
                width: style.stroke_width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                miter_limit: STROKE_MITER_LIMIT,
                ..Stroke::default()
            };
            for (dx, dy) in stroke_offsets() {
                let transform = Transform::from_translate(origin.x + dx, origin.y + dy);
                pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
        }

        let paint = solid_paint(style.fill);
        let transform = Transform::from_translate(origin.x, origin.y);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);

        Some(placement)
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`TextPainter`] that rasterizes onto a pixmap.
pub struct CanvasPainter<'a> {
    pixmap: &'a mut Pixmap,
    rasterizer: &'a TextRasterizer,
}

impl<'a> CanvasPainter<'a> {
    /// Paint onto `pixmap` with the faces held by `rasterizer`.
    pub fn new(pixmap: &'a mut Pixmap, rasterizer: &'a TextRasterizer) -> Self {
        Self { pixmap, rasterizer }
    }
}

impl TextPainter for CanvasPainter<'_> {
    fn draw_text(&mut self, text: &str, anchor: Point, alignment: Alignment, style: &TextStyle) {
        self.rasterizer
            .draw_text(self.pixmap, text, anchor, alignment, style);
    }
}

/// Collects glyph outlines into one path, flipping font units (y-up) into
/// canvas pixels (y-down) relative to the current pen position.
struct GlyphPathBuilder {
    inner: PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl GlyphPathBuilder {
    fn new(scale: f32) -> Self {
        Self {
            inner: PathBuilder::new(),
            scale,
            x: 0.0,
            y: 0.0,
        }
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y - y * self.scale)
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.inner.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.inner.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.inner.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.inner.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

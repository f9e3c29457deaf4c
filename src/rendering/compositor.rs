//! Record compositor - turns one record into one finished image.

use super::fonts::FontBook;
use super::text_rasterizer::{CanvasPainter, TextRasterizer};
use super::TextPainter;
use crate::config::MergeOptions;
use crate::error::{Error, Result};
use crate::layout::{Alignment, SlotKind};
use crate::records::Record;
use crate::template::Template;

use image::codecs::jpeg::JpegEncoder;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// Rendered image output.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// JPEG data; empty when encoding failed
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl RenderedImage {
    /// Save the image to a file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.data)?;
        Ok(())
    }

    /// Get the image data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether encoding produced no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Composites records onto a template according to a [`Layout`](crate::layout::Layout).
pub struct RecordCompositor {
    options: MergeOptions,
    rasterizer: TextRasterizer,
}

impl RecordCompositor {
    /// Create a compositor, discovering fonts from the options' sources.
    pub fn new(options: MergeOptions) -> Self {
        let book = FontBook::from_options(&options);
        Self::with_font_book(options, &book)
    }

    /// Create a compositor resolving faces from an existing font book.
    pub fn with_font_book(options: MergeOptions, book: &FontBook) -> Self {
        let rasterizer = TextRasterizer::for_layout(book, &options.layout);
        Self::with_rasterizer(options, rasterizer)
    }

    /// Create a compositor around a prepared rasterizer.
    pub fn with_rasterizer(options: MergeOptions, rasterizer: TextRasterizer) -> Self {
        Self {
            options,
            rasterizer,
        }
    }

    /// The options this compositor was built with.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// The rasterizer used for canvas output.
    pub fn rasterizer(&self) -> &TextRasterizer {
        &self.rasterizer
    }

    /// Issue every draw call for one record, in layout order.
    ///
    /// Well-known slots come first, then one line per remaining column whose
    /// value is non-empty, placed by the column's index in `columns`.
    /// Returns the number of draw calls made.
    pub fn paint_record<P: TextPainter>(
        &self,
        painter: &mut P,
        record: &Record,
        columns: &[String],
        canvas_width: u32,
    ) -> usize {
        let layout = &self.options.layout;
        let mut calls = 0;

        for slot in &layout.slots {
            if let Some(value) = record.value_ignore_case(slot.kind.column_name()) {
                let (anchor, alignment) = slot.resolve(canvas_width);
                painter.draw_text(&slot.kind.display_text(value), anchor, alignment, &slot.style);
                calls += 1;
            }
        }

        let extra = &layout.extra_fields;
        for (index, column) in columns.iter().enumerate() {
            if SlotKind::from_column_name(column).is_some() {
                continue;
            }
            if let Some(value) = record.value(column) {
                let text = format!("{}: {}", column, value);
                painter.draw_text(&text, extra.anchor(index), Alignment::Left, &extra.style);
                calls += 1;
            }
        }

        calls
    }

    /// Render one record onto a fresh template-sized canvas.
    pub fn render_canvas(
        &self,
        record: &Record,
        columns: &[String],
        template: &Template,
    ) -> Result<Pixmap> {
        let (width, height) = (template.width(), template.height());
        let mut pixmap =
            Pixmap::new(width, height).ok_or(Error::ContextUnavailable { width, height })?;

        pixmap.draw_pixmap(
            0,
            0,
            template.as_pixmap(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        let mut painter = CanvasPainter::new(&mut pixmap, &self.rasterizer);
        self.paint_record(&mut painter, record, columns, width);

        Ok(pixmap)
    }

    /// Render and encode one record.
    ///
    /// Fails only when no canvas can be allocated. An encoding failure yields
    /// an image with empty data.
    pub fn composite(
        &self,
        record: &Record,
        columns: &[String],
        template: &Template,
    ) -> Result<RenderedImage> {
        let pixmap = self.render_canvas(record, columns, template)?;
        let data = self.encode_jpeg(&pixmap).unwrap_or_else(|e| {
            log::warn!("{}; storing an empty image", e);
            Vec::new()
        });

        Ok(RenderedImage {
            data,
            width: pixmap.width(),
            height: pixmap.height(),
        })
    }

    /// Encode pixmap to JPEG format.
    pub fn encode_jpeg(&self, pixmap: &Pixmap) -> Result<Vec<u8>> {
        let width = pixmap.width();
        let height = pixmap.height();

        // JPEG has no alpha channel
        let mut rgb_data = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgb_data.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }

        let mut output = Vec::new();
        JpegEncoder::new_with_quality(&mut output, self.options.jpeg_quality)
            .encode(&rgb_data, width, height, image::ColorType::Rgb8)
            .map_err(|e| Error::Encode(format!("JPEG encoding failed: {}", e)))?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Point, TextStyle};
    use tiny_skia::Color;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, Point, Alignment)>,
    }

    impl TextPainter for Recorder {
        fn draw_text(
            &mut self,
            text: &str,
            anchor: Point,
            alignment: Alignment,
            _style: &TextStyle,
        ) {
            self.calls.push((text.to_string(), anchor, alignment));
        }
    }

    fn compositor() -> RecordCompositor {
        RecordCompositor::with_rasterizer(MergeOptions::default(), TextRasterizer::new())
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_paint_all_well_known() {
        let record = Record::new()
            .with("broker", "Acme")
            .with("name", "Jane")
            .with("project name", "Widget")
            .with("submit", "7");
        let cols = columns(&["broker", "name", "project name", "submit"]);
        let mut recorder = Recorder::default();
        let calls = compositor().paint_record(&mut recorder, &record, &cols, 1000);

        assert_eq!(calls, 4);
        let texts: Vec<_> = recorder.calls.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(texts, vec!["Acme", "Jane", "Widget", "FYP7"]);
        assert_eq!(recorder.calls[2].1, Point::new(500.0, 1000.0));
        assert_eq!(recorder.calls[2].2, Alignment::Centered);
        assert_eq!(recorder.calls[0].2, Alignment::Left);
    }

    #[test]
    fn test_paint_skips_falsy_fields() {
        let record = Record::new().with("broker", "").with("Name", "Jane");
        let cols = columns(&["broker", "Name"]);
        let mut recorder = Recorder::default();
        let calls = compositor().paint_record(&mut recorder, &record, &cols, 1000);
        assert_eq!(calls, 1);
        assert_eq!(recorder.calls[0].0, "Jane");
    }

    #[test]
    fn test_encode_jpeg_magic() {
        let mut pixmap = Pixmap::new(8, 8).unwrap();
        pixmap.fill(Color::WHITE);
        let data = compositor().encode_jpeg(&pixmap).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_composite_keeps_template_size() {
        let template = Template::solid(40, 30, Color::WHITE).unwrap();
        let image = compositor()
            .composite(&Record::new().with("extra", "x"), &columns(&["extra"]), &template)
            .unwrap();
        assert_eq!((image.width, image.height), (40, 30));
        assert!(!image.is_empty());
    }
}

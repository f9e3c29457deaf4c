//! Template image: the shared, read-only background of every output.

use crate::error::{Error, Result};
use std::path::Path;
use tiny_skia::{Color, ColorU8, Pixmap, PixmapRef};

/// A decoded template raster.
///
/// Its dimensions define the canvas size of every rendered image.
#[derive(Debug, Clone)]
pub struct Template {
    pixmap: Pixmap,
}

impl Template {
    /// Decode a template from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Decode a template from encoded image bytes (PNG or JPEG).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.as_raw())
    }

    /// Build a template from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::InvalidTemplate(format!(
                "expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }

        let mut pixmap = new_pixmap(width, height)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }

        log::debug!("Loaded {}x{} template", width, height);
        Ok(Self { pixmap })
    }

    /// A template filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut pixmap = new_pixmap(width, height)?;
        pixmap.fill(color);
        Ok(Self { pixmap })
    }

    /// Template width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Template height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Borrow the premultiplied pixels.
    pub fn as_pixmap(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| {
        Error::InvalidTemplate(format!("unusable dimensions {}x{}", width, height))
    })
}

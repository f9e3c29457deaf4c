//! Configuration for batch rendering.

use crate::layout::Layout;
use std::path::PathBuf;

/// JPEG quality used when none is configured (the 0.95 quality ratio).
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// File name suggested for the finished archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "generated_images.zip";

/// Options shared by the compositor and the batch driver.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Slot and extra-field layout
    pub layout: Layout,
    /// Whether installed system fonts are searched
    pub load_system_fonts: bool,
    /// Extra directories scanned for font files
    pub font_dirs: Vec<PathBuf>,
    /// Extra individual font files
    pub font_files: Vec<PathBuf>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            layout: Layout::default(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            font_files: Vec::new(),
        }
    }

    /// Set JPEG quality, clamped to 1-100.
    pub fn as_jpeg(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Replace the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Register a directory of font files.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    /// Register a single font file.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_files.push(path.into());
        self
    }

    /// Enable or disable system font discovery.
    pub fn with_system_fonts(mut self, enable: bool) -> Self {
        self.load_system_fonts = enable;
        self
    }
}

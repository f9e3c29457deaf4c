//! Font discovery and face resolution.
//!
//! Faces are looked up through `fontdb` in this order: the requested family
//! list, the generic sans-serif family, a short list of widely installed sans
//! families, and finally any face the database knows about.

use crate::config::MergeOptions;
use crate::error::{Error, Result};
use crate::layout::FaceKey;
use std::path::Path;
use std::sync::Arc;

/// Families tried after the requested ones and generic sans-serif.
const FALLBACK_FAMILIES: &[&str] = &[
    "Noto Sans",
    "Noto Sans CJK TC",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
];

/// A resolved font face: raw font data plus the face index inside it.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl FontFace {
    /// Raw font file bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within a font collection.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Family name of the resolved face.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Parse the face for shaping and outlining.
    pub fn parse(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Database of available font faces.
pub struct FontBook {
    db: fontdb::Database,
}

impl FontBook {
    /// Create an empty font book.
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
        }
    }

    /// Create a font book populated from the font sources in `options`.
    ///
    /// User-supplied files and directories are registered before system fonts.
    /// Files that cannot be read are logged and skipped.
    pub fn from_options(options: &MergeOptions) -> Self {
        let mut book = Self::new();
        for file in &options.font_files {
            if let Err(e) = book.load_font_file(file) {
                log::warn!("Skipping font {}: {}", file.display(), e);
            }
        }
        for dir in &options.font_dirs {
            book.load_fonts_dir(dir);
        }
        if options.load_system_fonts {
            book.load_system_fonts();
        }
        log::debug!("Font book holds {} faces", book.len());
        book
    }

    /// Register font data held in memory.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Register a font file.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.db.load_font_file(path.as_ref())?;
        Ok(())
    }

    /// Register every font file found in a directory, recursively.
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        self.db.load_fonts_dir(dir);
    }

    /// Register installed system fonts.
    pub fn load_system_fonts(&mut self) {
        self.db.load_system_fonts();
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Whether no faces are registered.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Resolve a face for a family list and weight.
    pub fn resolve(&self, key: &FaceKey) -> Result<FontFace> {
        let id = self
            .query_families(key)
            .or_else(|| self.db.faces().next().map(|f| f.id))
            .ok_or_else(|| Error::Font("no font faces available".to_string()))?;

        let family = self
            .db
            .face(id)
            .and_then(|info| info.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_default();

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| Error::Font(format!("cannot read face data for {}", family)))?;

        let face = FontFace {
            data: Arc::new(data),
            index,
            family,
        };
        if face.parse().is_none() {
            return Err(Error::Font(format!("cannot parse face {}", face.family)));
        }

        log::debug!(
            "Resolved {:?} weight {} to {}",
            key.families,
            key.weight,
            face.family
        );
        Ok(face)
    }

    fn query_families(&self, key: &FaceKey) -> Option<fontdb::ID> {
        let mut families: Vec<fontdb::Family<'_>> = key
            .families
            .iter()
            .map(|name| fontdb::Family::Name(name.as_str()))
            .collect();
        families.push(fontdb::Family::SansSerif);
        families.extend(FALLBACK_FAMILIES.iter().map(|name| fontdb::Family::Name(*name)));

        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(key.weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.db.query(&query)
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontSpec;

    #[test]
    fn test_empty_book_fails_to_resolve() {
        let book = FontBook::new();
        assert!(book.is_empty());
        let err = book.resolve(&FontSpec::bold(12.0).face_key()).unwrap_err();
        assert!(matches!(err, Error::Font(_)));
    }

    #[test]
    fn test_garbage_font_data_is_ignored() {
        let mut book = FontBook::new();
        book.load_font_data(b"definitely not a font".to_vec());
        assert!(book.is_empty());
    }

    #[test]
    fn test_missing_font_file() {
        let mut book = FontBook::new();
        assert!(book.load_font_file("/nonexistent/font.ttf").is_err());
    }

    #[test]
    fn test_unknown_family_falls_back_to_any_face() {
        let mut book = FontBook::new();
        book.load_font_data(include_bytes!("../../tests/fixtures/Tuffy.ttf").to_vec());
        assert_eq!(book.len(), 1);

        let key = FaceKey {
            families: vec!["No Such Family 12345".to_string()],
            weight: 700,
        };
        let face = book.resolve(&key).unwrap();
        assert_eq!(face.family(), "Tuffy");
        assert!(!face.data().is_empty());
        assert!(face.parse().is_some());
    }

    #[test]
    fn test_font_files_from_options() {
        let options = MergeOptions::new()
            .with_system_fonts(false)
            .with_font_file(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Tuffy.ttf"))
            .with_font_file("/nonexistent/font.ttf");
        let book = FontBook::from_options(&options);
        assert_eq!(book.len(), 1);
        assert!(book.resolve(&FontSpec::regular(12.0).face_key()).is_ok());
    }
}

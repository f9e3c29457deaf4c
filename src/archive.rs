//! Archive assembly: named image buffers bundled into one zip.
//!
//! Entries keep insertion order. [`Archive::finalize`] writes the whole
//! container into memory and only hands the bytes back once the zip is
//! complete, so a failure never leaks a partial container.

use crate::error::Result;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Extension of every image entry.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Archive entry name for the 1-based record index `n`.
pub fn entry_name(n: usize) -> String {
    format!("image_{}.{}", n, IMAGE_EXTENSION)
}

/// One named buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// File name inside the container
    pub name: String,
    /// Encoded image; may be empty
    pub data: Vec<u8>,
}

/// Ordered collection of named image buffers.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named buffer.
    pub fn push(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.entries.push(ArchiveEntry {
            name: name.into(),
            data,
        });
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize every entry into a DEFLATE-compressed zip.
    pub fn finalize(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.data)?;
        }

        let bytes = writer.finish()?.into_inner();
        log::debug!("Finalized archive: {} entries, {} bytes", self.len(), bytes.len());
        Ok(bytes)
    }

    /// Finalize and write the container to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finalize()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}

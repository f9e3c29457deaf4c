//! Batch driver: renders every record of a row store into an archive.
//!
//! Records are processed strictly one at a time in stored order, so archive
//! entries always come out in ascending record index. Faults in a single
//! record never abort the batch:
//!
//! - no canvas for a record: the record contributes no entry
//! - encoding failure: an empty buffer is stored under the record's name
//!
//! Only a missing template (before any work) and archive finalization are
//! fatal.

use crate::archive::{entry_name, Archive};
use crate::config::MergeOptions;
use crate::error::{Error, Result};
use crate::records::RowStore;
use crate::rendering::{FontBook, RecordCompositor};
use crate::template::Template;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Drives the compositor over a whole row store.
pub struct BatchRenderer {
    compositor: RecordCompositor,
}

impl BatchRenderer {
    /// Create a batch renderer, discovering fonts from the options' sources.
    pub fn new(options: MergeOptions) -> Self {
        Self::with_compositor(RecordCompositor::new(options))
    }

    /// Create a batch renderer resolving faces from an existing font book.
    pub fn with_font_book(options: MergeOptions, book: &FontBook) -> Self {
        Self::with_compositor(RecordCompositor::with_font_book(options, book))
    }

    /// Wrap an existing compositor.
    pub fn with_compositor(compositor: RecordCompositor) -> Self {
        Self { compositor }
    }

    /// The compositor used per record.
    pub fn compositor(&self) -> &RecordCompositor {
        &self.compositor
    }

    /// Render every record into a named, ordered archive.
    ///
    /// Entry `image_{n}.jpg` holds record `n` (1-based).
    pub fn render_all(&self, rows: &RowStore, template: Option<&Template>) -> Result<Archive> {
        self.render(rows, template, None)
    }

    /// Like [`render_all`](Self::render_all), polling `cancel` between records.
    ///
    /// A set flag stops the batch with [`Error::Cancelled`]; no partial
    /// archive is returned.
    pub fn render_all_with_cancel(
        &self,
        rows: &RowStore,
        template: Option<&Template>,
        cancel: &AtomicBool,
    ) -> Result<Archive> {
        self.render(rows, template, Some(cancel))
    }

    fn render(
        &self,
        rows: &RowStore,
        template: Option<&Template>,
        cancel: Option<&AtomicBool>,
    ) -> Result<Archive> {
        let template = template.ok_or(Error::MissingTemplate)?;
        let start = Instant::now();
        log::info!(
            "Rendering {} record(s) onto {}x{} template",
            rows.len(),
            template.width(),
            template.height()
        );

        if self.compositor.rasterizer().is_empty() && !rows.is_empty() {
            log::warn!("No font faces available; images will contain the template only");
        }

        let mut archive = Archive::new();
        for (i, record) in rows.records().iter().enumerate() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                log::info!("Batch cancelled after {} record(s)", i);
                return Err(Error::Cancelled { completed: i });
            }

            let name = entry_name(i + 1);
            match self.compositor.composite(record, rows.columns(), template) {
                Ok(image) => {
                    log::debug!("{}: {} bytes", name, image.data.len());
                    archive.push(name, image.data);
                },
                Err(e) => {
                    log::warn!("Skipping record {}: {}", i + 1, e);
                },
            }
        }

        log::info!(
            "Rendered {} image(s) in {:.2?}",
            archive.len(),
            start.elapsed()
        );
        Ok(archive)
    }
}

/// Render every record and finalize the archive into zip bytes.
pub fn merge_to_zip(
    rows: &RowStore,
    template: Option<&Template>,
    options: MergeOptions,
) -> Result<Vec<u8>> {
    let archive = BatchRenderer::new(options).render_all(rows, template)?;
    archive.finalize()
}

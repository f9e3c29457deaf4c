// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Mergeplate
//!
//! Batch "mail-merge onto an image": one rendered JPEG per spreadsheet row,
//! bundled into a single zip.
//!
//! ## Core Features
//!
//! - **Fixed Layout Slots**: `broker`, `name`, `project name` and `submit`
//!   columns are drawn at fixed or centered positions with their own colors
//! - **Extra Fields**: every other column is stacked as `"column: value"` in
//!   column order
//! - **Legible Text**: stroke-then-fill rendering with twelve softly offset
//!   strokes under each fill
//! - **Deterministic Output**: entries named `image_1.jpg` ... `image_N.jpg`
//!   in record order
//! - **Fault Isolation**: a bad record never aborts the batch
//!
//! ## Quick Start
//!
//! ```ignore
//! use mergeplate::{BatchRenderer, MergeOptions, Record, RowStore, Template};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let template = Template::open("background.jpg")?;
//! let rows = RowStore::new(vec![
//!     Record::new()
//!         .with("broker", "Acme")
//!         .with("name", "Jane")
//!         .with("project name", "Widget")
//!         .with("submit", "7"),
//! ]);
//!
//! let archive = BatchRenderer::new(MergeOptions::default())
//!     .render_all(&rows, Some(&template))?;
//! archive.save("generated_images.zip")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! Row store → batch driver → (compositor → text rasterizer) per record →
//! JPEG buffer → archive → zip bytes.
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Input data
pub mod records;
pub mod template;

// Static layout
pub mod layout;

// Drawing
pub mod rendering;

// Batch processing and output
pub mod archive;
pub mod batch;

// Configuration
pub mod config;

// Spreadsheet input (optional)
#[cfg(feature = "office")]
#[cfg_attr(docsrs, doc(cfg(feature = "office")))]
pub mod sheet;

// Re-exports
pub use archive::{entry_name, Archive, ArchiveEntry};
pub use batch::{merge_to_zip, BatchRenderer};
pub use config::{MergeOptions, DEFAULT_ARCHIVE_NAME, DEFAULT_JPEG_QUALITY};
pub use error::{Error, Result};
pub use layout::{Alignment, FontSpec, Layout, Point, Slot, SlotAnchor, SlotKind, TextStyle};
pub use records::{Record, RowStore};
pub use rendering::{RecordCompositor, RenderedImage, TextPainter};
pub use template::Template;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Error types for the merge pipeline.
//!
//! Only two conditions are fatal for a whole batch: a missing template and a
//! failure while finalizing the archive. Everything that goes wrong for a
//! single record is handled inside the batch driver.

/// Result type alias for merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering and bundling images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rendering was requested before a template image was loaded
    #[error("No template image loaded")]
    MissingTemplate,

    /// The template could not be decoded or has unusable dimensions
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// A drawing surface could not be allocated for a record
    #[error("Cannot allocate a {width}x{height} canvas")]
    ContextUnavailable {
        /// Requested canvas width in pixels
        width: u32,
        /// Requested canvas height in pixels
        height: u32,
    },

    /// Canvas to compressed image conversion failed
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Font error
    #[error("Font error: {0}")]
    Font(String),

    /// The archive container could not be written
    #[error("Failed to finalize archive: {0}")]
    ArchiveFinalize(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The batch was cancelled between records
    #[error("Batch cancelled after {completed} record(s)")]
    Cancelled {
        /// Records finished before the flag was observed
        completed: usize,
    },

    /// Spreadsheet could not be read
    #[cfg(feature = "office")]
    #[error("Spreadsheet error: {0}")]
    Sheet(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

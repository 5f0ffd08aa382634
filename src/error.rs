//! Error types for folio operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a manuscript into a book.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An optional decoder needed for this format is not installed.
    ///
    /// Kept apart from [`Error::ExtractionFailed`] so callers can say
    /// "install support" instead of "the file is broken".
    #[error("{format} files need {capability}, which is not installed ({hint})")]
    MissingCapability {
        format: &'static str,
        capability: String,
        hint: String,
    },

    #[error("could not extract text from {format} file: {reason}")]
    ExtractionFailed { format: &'static str, reason: String },

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid cover image: {0}")]
    InvalidCover(String),

    #[error("invalid style option: {0}")]
    InvalidStyle(String),

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn extraction(format: &'static str, reason: impl Into<String>) -> Self {
        Error::ExtractionFailed {
            format,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

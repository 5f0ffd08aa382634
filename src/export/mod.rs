//! Export module for writing finalized books to container formats.
//!
//! Provides the `Exporter` trait and the EPUB implementation.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! Exporters only ever see a [`BookModel`]; they never run extraction or
//! segmentation themselves.
//!
//! # Example
//!
//! ```no_run
//! use folio::{BuildRequest, Config, Pipeline};
//! use folio::export::{EpubExporter, Exporter};
//! use std::fs::File;
//!
//! let pipeline = Pipeline::new(Config::default());
//! let book = pipeline.build(&BuildRequest::new("novel.txt")).unwrap();
//!
//! let mut file = File::create("novel.epub")?;
//! EpubExporter::new().export(&book, &mut file)?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Seek, Write};

use crate::model::BookModel;

mod epub;
pub mod xhtml;

pub use epub::{EpubConfig, EpubExporter, write_epub};

/// Trait for exporting books to specific formats.
///
/// Exporters use a builder pattern where configuration is held in the struct,
/// and the `export` method writes to any `Write + Seek` destination.
pub trait Exporter {
    /// Export the book to the provided writer.
    ///
    /// The writer can be:
    /// - `std::fs::File` for disk output
    /// - `std::io::Cursor<Vec<u8>>` for seekable in-memory output
    /// - Any other type implementing `Write + Seek`
    fn export<W: Write + Seek>(&self, book: &BookModel, writer: &mut W) -> io::Result<()>;
}

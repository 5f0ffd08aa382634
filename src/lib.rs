//! # folio
//!
//! Turns manuscripts (plain text, PDF, DOCX, HWPX, HWP) into EPUB 3 books.
//!
//! ## Features
//!
//! - Text extraction with encoding detection for Korean legacy encodings
//! - Chapter detection for Markdown headings, Korean (`제 1 화`, `1장`) and
//!   Latin (`Chapter 1`, `EP.2`) numbering, and structural sections (프롤로그)
//! - Line classification into narrative, dialogue and scene breaks
//! - EPUB 3 packaging with cover, series and publisher metadata
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{BuildRequest, Config, Pipeline, write_epub};
//!
//! let pipeline = Pipeline::new(Config::default());
//! let request = BuildRequest::new("novel.txt")
//!     .with_title("나의 소설")
//!     .with_author("홍길동");
//! let book = pipeline.build(&request).unwrap();
//! write_epub(&book, "novel.epub").unwrap();
//! ```
//!
//! ## Assembling Books Directly
//!
//! The stages are usable on their own. [`BookAssembler`] is the only way to
//! produce a [`BookModel`]:
//!
//! ```
//! use folio::{BookAssembler, normalize, segment};
//!
//! let text = normalize("제 1 화\r\n\"안녕.\"\r\n***\r\n끝.");
//! let mut assembler = BookAssembler::new("나의 소설", "홍길동");
//! for section in segment(&text) {
//!     assembler.add_chapter(section.title, &section.body);
//! }
//! let book = assembler.finalize();
//! assert_eq!(book.chapters().len(), 1);
//! assert_eq!(book.chapters()[0].lines().len(), 3);
//! ```

pub mod assemble;
pub mod batch;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod preview;
pub mod segment;
pub(crate) mod util;

pub use assemble::BookAssembler;
pub use batch::{BatchItem, BatchReport, convert_batch, output_paths};
pub use classify::{ClassifiedLine, LineCategory, classify_body, classify_line};
pub use config::{Config, PreviewConfig};
pub use error::{Error, Result};
pub use export::{EpubExporter, Exporter, write_epub};
pub use extract::{Capabilities, ExtractedText, Extractor, LegacyDecoder, SourceFormat};
pub use model::{BookModel, Chapter, ChapterId, Cover, Series, StyleOptions};
pub use normalize::normalize;
pub use pipeline::{BuildRequest, Pipeline};
pub use preview::{BookPreview, ChapterPreview, preview_sections};
pub use segment::{BoundaryKind, Section, segment};
pub use util::MediaFormat;

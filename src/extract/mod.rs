//! Raw text extraction from source documents.
//!
//! Every supported input is reduced to one text blob. The format is picked
//! from the file extension (case-insensitive) and each [`SourceFormat`]
//! variant has exactly one extraction path:
//!
//! | Extension | Format | Extraction |
//! |-----------|--------|------------|
//! | `.txt`, `.md` | [`SourceFormat::PlainText`] | prioritized encoding detection |
//! | `.pdf` | [`SourceFormat::Pdf`] | per-page text layer |
//! | `.docx` | [`SourceFormat::WordXml`] | `word/document.xml` |
//! | `.hwpx` | [`SourceFormat::WordLegacyXml`] | `Contents/section*.xml` |
//! | `.hwp`, `.doc` | [`SourceFormat::LegacyBinary`] | external decoder / unsupported |

mod capability;
mod legacy;
mod pdf;
mod text;
mod xml_container;

use std::fmt;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::error::{Error, Result};
use crate::util::resolve_encodings;

pub use capability::{Capabilities, ExternalCommandDecoder, LegacyDecoder};

/// Binary formats that predate the zip-of-XML containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyKind {
    /// Hangul Word Processor 5 (`.hwp`)
    Hwp,
    /// Word 97-2003 (`.doc`)
    Doc,
}

/// Closed set of supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    PlainText,
    Pdf,
    /// Office Open XML word processing (`.docx`)
    WordXml,
    /// OWPML (`.hwpx`)
    WordLegacyXml,
    LegacyBinary(LegacyKind),
}

impl SourceFormat {
    /// Detect format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" | "md" => Some(SourceFormat::PlainText),
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::WordXml),
            "hwpx" => Some(SourceFormat::WordLegacyXml),
            "hwp" => Some(SourceFormat::LegacyBinary(LegacyKind::Hwp)),
            "doc" => Some(SourceFormat::LegacyBinary(LegacyKind::Doc)),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Short display name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::PlainText => "text",
            SourceFormat::Pdf => "PDF",
            SourceFormat::WordXml => "DOCX",
            SourceFormat::WordLegacyXml => "HWPX",
            SourceFormat::LegacyBinary(LegacyKind::Hwp) => "HWP",
            SourceFormat::LegacyBinary(LegacyKind::Doc) => "DOC",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An input file whose existence and format have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl RawDocument {
    /// Check existence first, then the extension.
    pub fn resolve(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let format = SourceFormat::from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_else(|| "(no extension)".to_string());
            Error::UnsupportedFormat(ext)
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }
}

/// Text pulled out of a source document. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True when there is no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Dispatches files to the matching format adapter.
#[derive(Debug, Clone)]
pub struct Extractor {
    capabilities: Capabilities,
    encodings: Vec<&'static Encoding>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Capabilities::none())
    }
}

impl Extractor {
    /// Create an extractor with the default plain-text encoding list.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            encodings: text::default_encodings(),
        }
    }

    /// Replace the plain-text encoding list with the given labels.
    ///
    /// Unknown labels are skipped; an empty result keeps only the lossy
    /// UTF-8 fallback.
    pub fn with_encodings<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.encodings = resolve_encodings(labels);
        self
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Extract the full text of the document at `path`.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let doc = RawDocument::resolve(path)?;
        self.extract_document(&doc)
    }

    pub fn extract_document(&self, doc: &RawDocument) -> Result<ExtractedText> {
        tracing::debug!(path = %doc.path.display(), format = %doc.format, "extracting");

        let text = match doc.format {
            SourceFormat::PlainText => text::extract(&doc.path, &self.encodings)?,
            SourceFormat::Pdf => pdf::extract(&doc.path)?,
            SourceFormat::WordXml | SourceFormat::WordLegacyXml => {
                xml_container::extract(&doc.path, doc.format)?
            }
            SourceFormat::LegacyBinary(kind) => {
                legacy::extract(&doc.path, kind, &self.capabilities)?
            }
        };

        tracing::debug!(chars = text.len(), "extracted text");
        Ok(ExtractedText(text))
    }
}

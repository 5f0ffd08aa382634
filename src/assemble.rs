//! Book assembly.
//!
//! [`BookAssembler`] collects chapters and metadata, then [`finalize`]
//! turns them into an immutable [`BookModel`].
//!
//! ```
//! use folio::BookAssembler;
//!
//! let mut assembler = BookAssembler::new("테스트", "홍길동");
//! assembler.add_chapter("1화", "안녕.\n\"네.\"");
//! let book = assembler.finalize();
//! assert_eq!(book.chapters()[0].id().to_string(), "chap_001");
//! ```
//!
//! [`finalize`]: BookAssembler::finalize

use std::path::Path;

use chrono::Utc;

use crate::classify::classify_body;
use crate::error::{Error, Result};
use crate::model::{BookModel, Chapter, ChapterId, Cover, Series, StyleOptions};
use crate::util::{MediaFormat, detect_media_format};

/// Default language tag.
pub const DEFAULT_LANGUAGE: &str = "ko";

/// Accumulates chapters and metadata for one book.
#[derive(Debug, Clone)]
pub struct BookAssembler {
    title: String,
    author: String,
    language: String,
    chapters: Vec<Chapter>,
    style: StyleOptions,
    cover: Option<Cover>,
    publisher: Option<String>,
    series: Option<Series>,
}

impl BookAssembler {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            chapters: Vec::new(),
            style: StyleOptions::default(),
            cover: None,
            publisher: None,
            series: None,
        }
    }

    /// Classify `body` and append it as the next chapter.
    ///
    /// The title is trimmed; a blank title becomes `Chapter <ordinal>`.
    pub fn add_chapter(&mut self, title: impl Into<String>, body: &str) -> ChapterId {
        let id = ChapterId(self.chapters.len() as u32 + 1);
        let title = match title.into().trim() {
            "" => format!("Chapter {}", id.ordinal()),
            trimmed => trimmed.to_string(),
        };
        let lines = classify_body(body);
        self.chapters.push(Chapter::new(id, title, lines));
        id
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Attach cover art. `media_type` must name an image format.
    pub fn set_cover(&mut self, data: Vec<u8>, media_type: &str) -> Result<()> {
        let format = MediaFormat::from_mime_type(media_type);
        if !format.is_image() {
            return Err(Error::InvalidCover(format!(
                "{media_type} is not a supported image type"
            )));
        }
        if data.is_empty() {
            return Err(Error::InvalidCover("image data is empty".to_string()));
        }
        self.cover = Some(Cover { data, format });
        Ok(())
    }

    /// Read cover art from disk, detecting its format by extension or magic bytes.
    pub fn set_cover_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        let format = detect_media_format(&path.to_string_lossy(), &data);
        if !format.is_image() {
            return Err(Error::InvalidCover(format!(
                "{} is not a recognized image",
                path.display()
            )));
        }
        self.set_cover(data, format.mime_type())
    }

    pub fn set_publisher(&mut self, publisher: impl Into<String>) {
        self.publisher = Some(publisher.into());
    }

    pub fn set_series(&mut self, name: impl Into<String>, index: Option<u32>) {
        self.series = Some(Series {
            name: name.into(),
            index,
        });
    }

    pub fn set_style(&mut self, style: StyleOptions) -> Result<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Render the stylesheet, stamp identifier and time, and hand over the book.
    pub fn finalize(self) -> BookModel {
        let identifier = format!("urn:uuid:{}", uuid::Uuid::new_v4());
        tracing::debug!(
            title = %self.title,
            chapters = self.chapters.len(),
            %identifier,
            "finalized book"
        );

        BookModel {
            stylesheet: self.style.render_stylesheet(),
            title: self.title,
            author: self.author,
            identifier,
            language: self.language,
            chapters: self.chapters,
            cover: self.cover,
            publisher: self.publisher,
            series: self.series,
            modified: Utc::now(),
        }
    }
}

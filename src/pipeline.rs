//! End-to-end conversion from a source file to a [`BookModel`].

use std::path::{Path, PathBuf};

use crate::assemble::BookAssembler;
use crate::config::{Config, DEFAULT_TITLE};
use crate::error::{Error, Result};
use crate::extract::{Capabilities, ExtractedText, Extractor, RawDocument};
use crate::model::{BookModel, StyleOptions};
use crate::normalize::normalize;
use crate::preview::{BookPreview, preview_sections};
use crate::segment::{Section, segment};

/// Everything needed to build one book. Unset fields fall back to the
/// pipeline's [`Config`].
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub input: PathBuf,
    /// Defaults to the input file stem.
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover: Option<PathBuf>,
    pub publisher: Option<String>,
    pub series: Option<String>,
    pub series_index: Option<u32>,
    pub style: Option<StyleOptions>,
    pub language: Option<String>,
}

impl BuildRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_cover(mut self, cover: impl Into<PathBuf>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

/// Title derived from a file name: its stem, or the default title.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Extraction, normalization, segmentation, classification and assembly.
///
/// Capabilities are resolved once at construction; the pipeline is
/// `Send + Sync` and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    extractor: Extractor,
}

impl Pipeline {
    /// Create a pipeline, probing the system for the configured legacy decoder.
    pub fn new(config: Config) -> Self {
        let capabilities = Capabilities::detect(&config.legacy_decoder);
        Self::with_capabilities(config, capabilities)
    }

    pub fn with_capabilities(config: Config, capabilities: Capabilities) -> Self {
        let extractor = Extractor::new(capabilities).with_encodings(config.encodings.as_slice());
        Self { config, extractor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Extract the raw text of `path`, rejecting documents without content.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let doc = RawDocument::resolve(path)?;
        let text = self.extractor.extract_document(&doc)?;
        if text.is_blank() {
            return Err(Error::extraction(doc.format.name(), "document is empty"));
        }
        Ok(text)
    }

    fn sections(&self, path: &Path) -> Result<Vec<Section>> {
        let text = self.extract(path)?;
        Ok(segment(&normalize(text.as_str())))
    }

    /// Build a finalized book from the request.
    pub fn build(&self, request: &BuildRequest) -> Result<BookModel> {
        let sections = self.sections(&request.input)?;

        let title = request
            .title
            .clone()
            .unwrap_or_else(|| title_from_path(&request.input));
        let author = request
            .author
            .clone()
            .unwrap_or_else(|| self.config.default_author.clone());

        let mut assembler = BookAssembler::new(title, author);
        assembler.set_language(
            request
                .language
                .as_deref()
                .unwrap_or(&self.config.language),
        );
        assembler.set_style(request.style.unwrap_or(self.config.style))?;

        if let Some(publisher) = request
            .publisher
            .as_ref()
            .or(self.config.default_publisher.as_ref())
        {
            assembler.set_publisher(publisher.as_str());
        }
        if let Some(series) = &request.series {
            assembler.set_series(series.as_str(), request.series_index);
        }
        if let Some(cover) = &request.cover {
            assembler.set_cover_file(cover)?;
        }

        for section in &sections {
            assembler.add_chapter(section.title.as_str(), &section.body);
        }

        let book = assembler.finalize();
        tracing::info!(
            input = %request.input.display(),
            title = book.title(),
            chapters = book.chapters().len(),
            "built book"
        );
        Ok(book)
    }

    /// Chapter overview of `path` without classification or assembly.
    pub fn preview(&self, path: &Path) -> Result<BookPreview> {
        let sections = self.sections(path)?;
        Ok(preview_sections(&sections, &self.config.preview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_pipeline_is_send_sync() {
        assert_send_sync::<Pipeline>();
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path(Path::new("/tmp/나의 소설.txt")), "나의 소설");
        assert_eq!(title_from_path(Path::new("/")), DEFAULT_TITLE);
    }

    #[test]
    fn test_blank_document_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\n ").unwrap();

        let pipeline = Pipeline::with_capabilities(Config::default(), Capabilities::none());
        let err = pipeline.build(&BuildRequest::new(&path)).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed { format: "text", .. }));
    }

    #[test]
    fn test_config_defaults_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("소설.txt");
        std::fs::write(&path, "1화\n본문").unwrap();

        let config = Config {
            default_publisher: Some("Folio Press".to_string()),
            ..Config::default()
        };
        let pipeline = Pipeline::with_capabilities(config, Capabilities::none());
        let book = pipeline.build(&BuildRequest::new(&path)).unwrap();

        assert_eq!(book.title(), "소설");
        assert_eq!(book.author(), "작가 미상");
        assert_eq!(book.language(), "ko");
        assert_eq!(book.publisher(), Some("Folio Press"));
    }
}

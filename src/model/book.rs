use chrono::{DateTime, Utc};

use super::Chapter;
use crate::util::MediaFormat;

/// Cover image bytes with their detected format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub data: Vec<u8>,
    pub format: MediaFormat,
}

impl Cover {
    /// Path of the cover image inside the container, relative to the package.
    pub fn file_name(&self) -> String {
        format!("images/cover.{}", self.format.extension())
    }
}

/// Series membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub name: String,
    pub index: Option<u32>,
}

/// The finalized in-memory book handed to exporters.
///
/// Only [`BookAssembler::finalize`](crate::BookAssembler::finalize) produces
/// one. There are no mutators.
#[derive(Debug, Clone)]
pub struct BookModel {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) identifier: String,
    pub(crate) language: String,
    pub(crate) chapters: Vec<Chapter>,
    pub(crate) stylesheet: String,
    pub(crate) cover: Option<Cover>,
    pub(crate) publisher: Option<String>,
    pub(crate) series: Option<Series>,
    pub(crate) modified: DateTime<Utc>,
}

impl BookModel {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Opaque `urn:uuid:` identifier, random per build.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// BCP 47 language tag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Chapters in ordinal order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn cover(&self) -> Option<&Cover> {
        self.cover.as_ref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

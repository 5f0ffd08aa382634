//! Conversion settings, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! language = "ko"
//! default_author = "작가 미상"
//! encodings = ["utf-8", "windows-949", "euc-kr", "iso-8859-1"]
//! legacy_decoder = "hwp5txt"
//!
//! [style]
//! font_size_px = 16
//! line_height = 1.8
//!
//! [preview]
//! chapter_limit = 10
//! snippet_chars = 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::StyleOptions;

/// Author used when none is given.
pub const DEFAULT_AUTHOR: &str = "작가 미상";

/// Title used when none is given and none can be derived from the file name.
pub const DEFAULT_TITLE: &str = "제목 없음";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// BCP 47 language tag written into every book.
    pub language: String,
    pub default_author: String,
    pub default_publisher: Option<String>,
    /// Plain-text encodings tried in order, by WHATWG label.
    pub encodings: Vec<String>,
    /// External program used to decode `.hwp` files.
    pub legacy_decoder: String,
    pub style: StyleOptions,
    pub preview: PreviewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "ko".to_string(),
            default_author: DEFAULT_AUTHOR.to_string(),
            default_publisher: None,
            encodings: ["utf-8", "windows-949", "euc-kr", "iso-8859-1"]
                .into_iter()
                .map(String::from)
                .collect(),
            legacy_decoder: "hwp5txt".to_string(),
            style: StyleOptions::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.style.validate().map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }
}

/// Limits for chapter previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Number of chapters listed individually.
    pub chapter_limit: usize,
    /// Characters kept in each chapter snippet.
    pub snippet_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            chapter_limit: 10,
            snippet_chars: 100,
        }
    }
}

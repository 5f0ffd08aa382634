//! Optional decoders, resolved once and shared read-only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Decodes a legacy binary document to text.
pub trait LegacyDecoder: Send + Sync + fmt::Debug {
    /// Human-readable decoder name, used in messages.
    fn name(&self) -> &str;

    fn decode(&self, path: &Path) -> Result<String>;
}

/// Runs an external program with the document path as its only argument and
/// reads the text from its standard output.
#[derive(Debug, Clone)]
pub struct ExternalCommandDecoder {
    name: String,
    program: PathBuf,
}

impl ExternalCommandDecoder {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
        }
    }

    /// Look `program` up on `PATH`.
    pub fn locate(program: &str) -> Option<Self> {
        match which::which(program) {
            Ok(resolved) => {
                tracing::debug!(program, path = %resolved.display(), "found legacy decoder");
                Some(Self::new(program, resolved))
            }
            Err(_) => {
                tracing::debug!(program, "legacy decoder not on PATH");
                None
            }
        }
    }
}

impl LegacyDecoder for ExternalCommandDecoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program).arg(path).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::extraction(
                "HWP",
                format!("{} exited with {}: {}", self.name, output.status, stderr.trim()),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(Error::extraction(
                "HWP",
                format!("{} produced no text", self.name),
            ));
        }
        Ok(text)
    }
}

/// Registry of optional decoders available to the extractor.
#[derive(Debug, Clone)]
pub struct Capabilities {
    legacy: Option<Arc<dyn LegacyDecoder>>,
    legacy_program: String,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::none()
    }
}

impl Capabilities {
    /// No optional decoders.
    pub fn none() -> Self {
        Self {
            legacy: None,
            legacy_program: "hwp5txt".to_string(),
        }
    }

    /// Probe the system for the external legacy decoder `program`.
    pub fn detect(program: &str) -> Self {
        Self {
            legacy: ExternalCommandDecoder::locate(program)
                .map(|decoder| Arc::new(decoder) as Arc<dyn LegacyDecoder>),
            legacy_program: program.to_string(),
        }
    }

    pub fn with_legacy_decoder(mut self, decoder: Arc<dyn LegacyDecoder>) -> Self {
        self.legacy_program = decoder.name().to_string();
        self.legacy = Some(decoder);
        self
    }

    pub fn legacy_decoder(&self) -> Option<&dyn LegacyDecoder> {
        self.legacy.as_deref()
    }

    /// Name of the legacy decoder that is (or would be) used.
    pub fn legacy_program(&self) -> &str {
        &self.legacy_program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed;

    impl LegacyDecoder for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn decode(&self, _path: &Path) -> Result<String> {
            Ok("text".to_string())
        }
    }

    #[test]
    fn test_none_has_no_decoder() {
        let caps = Capabilities::none();
        assert!(caps.legacy_decoder().is_none());
        assert_eq!(caps.legacy_program(), "hwp5txt");
    }

    #[test]
    fn test_detect_missing_program() {
        let caps = Capabilities::detect("folio-no-such-decoder-xyz");
        assert!(caps.legacy_decoder().is_none());
        assert_eq!(caps.legacy_program(), "folio-no-such-decoder-xyz");
    }

    #[test]
    fn test_with_legacy_decoder() {
        let caps = Capabilities::none().with_legacy_decoder(Arc::new(Fixed));
        let decoder = caps.legacy_decoder().unwrap();
        assert_eq!(decoder.name(), "fixed");
        assert_eq!(decoder.decode(Path::new("x.hwp")).unwrap(), "text");
    }

    #[cfg(unix)]
    #[test]
    fn test_external_command_failure() {
        let decoder = ExternalCommandDecoder::new("false", "false");
        let err = decoder.decode(Path::new("x.hwp")).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed { format: "HWP", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_command_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("novel.hwp");
        std::fs::write(&path, "제 1 화\n본문").unwrap();

        let decoder = ExternalCommandDecoder::new("cat", "cat");
        assert_eq!(decoder.decode(&path).unwrap(), "제 1 화\n본문");
    }
}

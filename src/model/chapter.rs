use std::fmt;

use crate::classify::ClassifiedLine;

/// Sequential chapter identifier, starting at 1.
///
/// Doubles as the chapter ordinal and names the chapter's content document
/// (`chap_001.xhtml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChapterId(pub(crate) u32);

impl ChapterId {
    pub fn ordinal(self) -> u32 {
        self.0
    }

    /// Content document name inside the container.
    pub fn file_name(self) -> String {
        format!("{self}.xhtml")
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chap_{:03}", self.0)
    }
}

/// A titled chapter of classified lines. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    lines: Vec<ClassifiedLine>,
}

impl Chapter {
    pub(crate) fn new(id: ChapterId, title: String, lines: Vec<ClassifiedLine>) -> Self {
        Self { id, title, lines }
    }

    pub fn id(&self) -> ChapterId {
        self.id
    }

    pub fn ordinal(&self) -> u32 {
        self.id.ordinal()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[ClassifiedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rendered body fragments, one paragraph per line.
    pub fn body_xhtml(&self) -> String {
        self.lines
            .iter()
            .map(ClassifiedLine::to_xhtml)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

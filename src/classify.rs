//! Line classification.
//!
//! Each body line is looked at on its own, after trimming:
//! blank lines vanish, scene-break tokens become a canonical marker, lines
//! opening with a quotation mark are dialogue and everything else is
//! narrative. There is no multi-line dialogue tracking.

use crate::util::escape_xml;

/// Canonical text of every scene break, whatever token the author used.
pub const SCENE_BREAK_MARKER: &str = "***";

/// Whole-line tokens recognized as scene breaks.
const SCENE_BREAK_TOKENS: [&str; 4] = ["***", "---", "###", "==="];

/// Opening characters that mark a line as dialogue.
const DIALOGUE_OPENERS: [char; 8] = ['"', '\'', '“', '”', '‘', '’', '「', '『'];

/// Presentational category of a body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCategory {
    Narrative,
    Dialogue,
    SceneBreak,
}

impl LineCategory {
    /// CSS class applied to the rendered paragraph, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            LineCategory::Narrative => None,
            LineCategory::Dialogue => Some("dialogue"),
            LineCategory::SceneBreak => Some("scene-break"),
        }
    }
}

/// One non-blank, trimmed body line with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    text: String,
    category: LineCategory,
}

impl ClassifiedLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> LineCategory {
        self.category
    }

    /// Render as an XHTML paragraph fragment.
    ///
    /// ```
    /// use folio::classify::classify_line;
    ///
    /// let line = classify_line("「어서 와」").unwrap();
    /// assert_eq!(line.to_xhtml(), r#"<p class="dialogue">「어서 와」</p>"#);
    /// ```
    pub fn to_xhtml(&self) -> String {
        let text = escape_xml(&self.text);
        match self.category.css_class() {
            Some(class) => format!("<p class=\"{class}\">{text}</p>"),
            None => format!("<p>{text}</p>"),
        }
    }
}

/// Classify one line. Returns `None` for blank lines.
pub fn classify_line(line: &str) -> Option<ClassifiedLine> {
    let line = line.trim();
    let first = line.chars().next()?;

    let (text, category) = if SCENE_BREAK_TOKENS.contains(&line) {
        (SCENE_BREAK_MARKER.to_string(), LineCategory::SceneBreak)
    } else if DIALOGUE_OPENERS.contains(&first) {
        (line.to_string(), LineCategory::Dialogue)
    } else {
        (line.to_string(), LineCategory::Narrative)
    };

    Some(ClassifiedLine { text, category })
}

/// Classify every line of a chapter body, dropping blank lines.
pub fn classify_body(body: &str) -> Vec<ClassifiedLine> {
    body.lines().filter_map(classify_line).collect()
}

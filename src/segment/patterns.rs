//! Cached regex patterns for chapter boundary lines.
//!
//! Uses LazyLock to compile patterns once on first use. Every pattern is
//! anchored at the start of a single physical line; leading blanks (space,
//! tab, ideographic space) are tolerated.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Horizontal whitespace, including U+3000 which regex-lite's `\s` skips.
const WS: &str = "[ \t\u{3000}]";
const NOT_WS: &str = "[^ \t\u{3000}]";

/// Matches `# Title`, `### Title`
pub static MARKDOWN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{WS}*#+{WS}+{NOT_WS}")).unwrap()
});

/// Matches `제 1 화`, `제12장 ...`, `제3권`, `제 2 부`, `제1편`, `제4절`
pub static KOREAN_ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{WS}*제{WS}*[0-9]+{WS}*[화장권부편절]")).unwrap()
});

/// Matches `1화`, `12 장 ...`
pub static NUMBERED_KOREAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{WS}*[0-9]+{WS}*[화장]")).unwrap()
});

/// Matches `Chapter 1`, `EPISODE 2`, `Part 3`, `EP 4`, `ep.5`
pub static LATIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{WS}*(?:chapter|episode|part|ep\.?){WS}*[0-9]+")).unwrap()
});

/// Matches prologue, epilogue, foreword, afterword and interlude headings
pub static STRUCTURAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{WS}*(?:프롤로그|에필로그|서문|후기|막간)")).unwrap()
});

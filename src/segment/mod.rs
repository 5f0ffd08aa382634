//! Chapter segmentation.
//!
//! Splits normalized manuscript text into ordered `(title, body)` sections.
//! A line is a *boundary* when it matches one of the chapter-marker forms in
//! [`BoundaryKind`]; it closes the previous section and becomes the title of
//! the next. Matching is line-local and first-match-wins: a narrative line
//! that happens to start like a marker ("1장의 사진을...") is still a
//! boundary.
//!
//! ```
//! use folio::segment::segment;
//!
//! let sections = segment("머리말\n제 1 화 시작\n본문\n제 2 화\n끝");
//! let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
//! assert_eq!(titles, ["Introduction", "제 1 화 시작", "제 2 화"]);
//! ```

mod patterns;

use regex_lite::Regex;

use patterns::{KOREAN_ORDINAL_RE, LATIN_RE, MARKDOWN_RE, NUMBERED_KOREAN_RE, STRUCTURAL_RE};

/// Title given to the only section when the text has no boundary lines.
pub const DEFAULT_TITLE: &str = "Chapter 1";

/// Title given to text that precedes the first boundary line.
pub const PREAMBLE_TITLE: &str = "Introduction";

/// Which chapter-marker form a boundary line matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// `# Title`
    Markdown,
    /// `제 N 화`, `제N장`, `제N권`, `제N부`, `제N편`, `제N절`
    KoreanOrdinal,
    /// `N화`, `N장`
    NumberedKorean,
    /// `Chapter N`, `Episode N`, `Part N`, `EP N`, `EP.N`
    Latin,
    /// 프롤로그, 에필로그, 서문, 후기, 막간
    Structural,
}

/// A titled run of body text, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    fn new(title: impl Into<String>, body: &str) -> Self {
        Self {
            title: title.into(),
            body: body.trim().to_string(),
        }
    }
}

/// Classify a single physical line as a chapter boundary.
///
/// Forms are tried in a fixed order and the first match wins, so the kinds
/// are mutually exclusive.
pub fn boundary_kind(line: &str) -> Option<BoundaryKind> {
    let order: [(BoundaryKind, &Regex); 5] = [
        (BoundaryKind::Markdown, &*MARKDOWN_RE),
        (BoundaryKind::KoreanOrdinal, &*KOREAN_ORDINAL_RE),
        (BoundaryKind::NumberedKorean, &*NUMBERED_KOREAN_RE),
        (BoundaryKind::Latin, &*LATIN_RE),
        (BoundaryKind::Structural, &*STRUCTURAL_RE),
    ];

    order
        .into_iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(kind, _)| kind)
}

/// Split text into sections at boundary lines.
///
/// - No boundary at all: one section titled [`DEFAULT_TITLE`] holding the
///   whole text.
/// - Non-blank text before the first boundary: its own leading section titled
///   [`PREAMBLE_TITLE`].
/// - Titles are the trimmed boundary lines; bodies are trimmed. Sections keep
///   document order and duplicate titles are left as they are.
///
/// Never fails; any input yields at least one section.
pub fn segment(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut preamble = String::new();
    let mut current: Option<(&str, String)> = None;

    for line in text.lines() {
        if boundary_kind(line).is_some() {
            if let Some((title, body)) = current.take() {
                sections.push(Section::new(title.trim(), &body));
            }
            current = Some((line, String::new()));
            continue;
        }

        let body = match current.as_mut() {
            Some((_, body)) => body,
            None => &mut preamble,
        };
        body.push_str(line);
        body.push('\n');
    }

    let Some((title, body)) = current else {
        tracing::debug!("no chapter markers found, using a single chapter");
        return vec![Section::new(DEFAULT_TITLE, text)];
    };
    sections.push(Section::new(title.trim(), &body));

    if !preamble.trim().is_empty() {
        sections.insert(0, Section::new(PREAMBLE_TITLE, &preamble));
    }

    tracing::debug!(sections = sections.len(), "segmented text");
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_boundary_kinds() {
        assert_eq!(boundary_kind("# 시작"), Some(BoundaryKind::Markdown));
        assert_eq!(boundary_kind("### Part of it"), Some(BoundaryKind::Markdown));
        assert_eq!(boundary_kind("제 1 화"), Some(BoundaryKind::KoreanOrdinal));
        assert_eq!(boundary_kind("제12장 새로운 시작"), Some(BoundaryKind::KoreanOrdinal));
        assert_eq!(boundary_kind("제3권"), Some(BoundaryKind::KoreanOrdinal));
        assert_eq!(boundary_kind("제 2 부 귀환"), Some(BoundaryKind::KoreanOrdinal));
        assert_eq!(boundary_kind("1화"), Some(BoundaryKind::NumberedKorean));
        assert_eq!(boundary_kind("12 장 끝"), Some(BoundaryKind::NumberedKorean));
        assert_eq!(boundary_kind("Chapter 1"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("CHAPTER 10: The End"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("Episode 3"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("EP 4"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("EP.5"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("part 2"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("프롤로그"), Some(BoundaryKind::Structural));
        assert_eq!(boundary_kind("에필로그 - 그 후"), Some(BoundaryKind::Structural));
        assert_eq!(boundary_kind("서문"), Some(BoundaryKind::Structural));
        assert_eq!(boundary_kind("후기"), Some(BoundaryKind::Structural));
        assert_eq!(boundary_kind("막간"), Some(BoundaryKind::Structural));
    }

    #[test]
    fn test_non_boundaries() {
        assert_eq!(boundary_kind("안녕하세요."), None);
        assert_eq!(boundary_kind("###"), None);
        assert_eq!(boundary_kind("#hashtag"), None);
        assert_eq!(boundary_kind("\"Chapter 1,\" she read aloud."), None);
        assert_eq!(boundary_kind("The chapter ended."), None);
        assert_eq!(boundary_kind("Epilogue"), None);
        assert_eq!(boundary_kind("Particle 3"), None);
        assert_eq!(boundary_kind("제가 말했다."), None);
        assert_eq!(boundary_kind(""), None);
    }

    #[test]
    fn test_indented_marker() {
        assert_eq!(boundary_kind("   Chapter 7"), Some(BoundaryKind::Latin));
        assert_eq!(boundary_kind("\u{3000}제 1 화"), Some(BoundaryKind::KoreanOrdinal));
    }

    #[test]
    fn test_markdown_wins_over_later_forms() {
        assert_eq!(boundary_kind("# Chapter 1"), Some(BoundaryKind::Markdown));
        assert_eq!(boundary_kind("# 프롤로그"), Some(BoundaryKind::Markdown));
    }

    #[test]
    fn test_no_boundaries_gives_single_chapter() {
        let sections = segment("첫 줄\n둘째 줄\n\n셋째 줄\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, DEFAULT_TITLE);
        assert_eq!(sections[0].body, "첫 줄\n둘째 줄\n\n셋째 줄");
    }

    #[test]
    fn test_empty_text_gives_single_empty_chapter() {
        let sections = segment("");
        assert_eq!(titles(&sections), [DEFAULT_TITLE]);
        assert!(sections[0].body.is_empty());
    }

    #[test]
    fn test_preamble_becomes_introduction() {
        let sections = segment("작가의 말\n\nChapter 1\n본문 하나\nChapter 2\n본문 둘");
        assert_eq!(titles(&sections), [PREAMBLE_TITLE, "Chapter 1", "Chapter 2"]);
        assert_eq!(sections[0].body, "작가의 말");
        assert_eq!(sections[2].body, "본문 둘");
    }

    #[test]
    fn test_blank_preamble_is_dropped() {
        let sections = segment("\n  \n제 1 화\n본문");
        assert_eq!(titles(&sections), ["제 1 화"]);
    }

    #[test]
    fn test_titles_and_bodies_trimmed() {
        let sections = segment("  Chapter 1 시작  \n\n  본문  \n\n");
        assert_eq!(sections[0].title, "Chapter 1 시작");
        assert_eq!(sections[0].body, "본문");
    }

    #[test]
    fn test_empty_chapters_and_duplicate_titles_kept() {
        let sections = segment("1화\n1화\n본문");
        assert_eq!(titles(&sections), ["1화", "1화"]);
        assert!(sections[0].body.is_empty());
        assert_eq!(sections[1].body, "본문");
    }

    #[test]
    fn test_crlf_input() {
        let unix = segment("Chapter 1\n가\nChapter 2\n나");
        let dos = segment("Chapter 1\r\n가\r\nChapter 2\r\n나");
        assert_eq!(unix, dos);
    }

    proptest! {
        #[test]
        fn prop_n_boundaries_with_preamble(n in 1usize..20, preamble in "[a-z]{1,12}") {
            let mut text = format!("{preamble}\n");
            for i in 1..=n {
                text.push_str(&format!("Chapter {i}\nbody {i}\n"));
            }
            let sections = segment(&text);
            prop_assert_eq!(sections.len(), n + 1);
            prop_assert_eq!(sections[0].title.as_str(), PREAMBLE_TITLE);
        }

        #[test]
        fn prop_plain_lowercase_text_is_one_chapter(text in "[a-z ,.\n]{0,200}") {
            let sections = segment(&text);
            prop_assert_eq!(sections.len(), 1);
            prop_assert_eq!(sections[0].title.as_str(), DEFAULT_TITLE);
        }

        #[test]
        fn prop_titles_never_empty(text in "\\PC{0,200}") {
            for section in segment(&text) {
                prop_assert!(!section.title.is_empty());
            }
        }
    }
}

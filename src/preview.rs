//! Chapter previews without building a book.

use serde::Serialize;

use crate::config::PreviewConfig;
use crate::segment::Section;

/// Summary of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterPreview {
    pub title: String,
    /// Non-whitespace characters in the body.
    pub char_count: usize,
    pub snippet: String,
}

/// Summary of a whole manuscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPreview {
    pub total_chapters: usize,
    pub total_chars: usize,
    /// The first `chapter_limit` chapters.
    pub chapters: Vec<ChapterPreview>,
}

fn count_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Collapse whitespace runs to single spaces and cut to `limit` characters.
fn snippet(body: &str, limit: usize) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}…", collapsed[..cut].trim_end()),
        None => collapsed,
    }
}

pub fn preview_sections(sections: &[Section], config: &PreviewConfig) -> BookPreview {
    let chapters = sections
        .iter()
        .take(config.chapter_limit)
        .map(|section| ChapterPreview {
            title: section.title.clone(),
            char_count: count_chars(&section.body),
            snippet: snippet(&section.body, config.snippet_chars),
        })
        .collect();

    BookPreview {
        total_chapters: sections.len(),
        total_chars: sections.iter().map(|s| count_chars(&s.body)).sum(),
        chapters,
    }
}

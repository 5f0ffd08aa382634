//! XHTML document synthesis for chapters and navigation.

use crate::model::{BookModel, Chapter};
use crate::util::escape_xml;

/// Stylesheet path relative to the content documents.
pub const STYLESHEET_HREF: &str = "style/main.css";

/// Build a complete XHTML5 content document for one chapter.
///
/// The title becomes the `<h1>`; the classified lines follow as paragraphs.
pub fn chapter_document(chapter: &Chapter, language: &str) -> String {
    let title = escape_xml(chapter.title());
    let lang = escape_xml(language);
    let body = chapter.body_xhtml();

    let mut doc = String::with_capacity(body.len() + 512);
    doc.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="{lang}" lang="{lang}">
<head>
  <meta charset="UTF-8"/>
  <title>{title}</title>
  <link rel="stylesheet" type="text/css" href="{STYLESHEET_HREF}"/>
</head>
<body>
<section id="{id}" epub:type="chapter">
<h1>{title}</h1>
"#,
        id = chapter.id(),
    ));
    if !body.is_empty() {
        doc.push_str(&body);
        doc.push('\n');
    }
    doc.push_str("</section>\n</body>\n</html>\n");
    doc
}

/// Build the EPUB 3 navigation document listing every chapter.
pub fn nav_document(book: &BookModel) -> String {
    let lang = escape_xml(book.language());
    let title = escape_xml(book.title());

    let mut nav = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="{lang}" lang="{lang}">
<head>
  <meta charset="UTF-8"/>
  <title>{title}</title>
</head>
<body>
<nav epub:type="toc" id="toc">
  <h1>{title}</h1>
  <ol>
"#
    );
    for chapter in book.chapters() {
        nav.push_str(&format!(
            "    <li><a href=\"{}\">{}</a></li>\n",
            chapter.id().file_name(),
            escape_xml(chapter.title())
        ));
    }
    nav.push_str("  </ol>\n</nav>\n</body>\n</html>\n");
    nav
}

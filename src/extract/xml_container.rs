//! Zip-of-XML adapters (`.docx`, `.hwpx`).
//!
//! Both formats keep body text in XML members of a zip archive. Element names
//! are compared after stripping namespace prefixes, so `w:t` and `hp:t` are
//! both text runs.

use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use super::SourceFormat;
use crate::error::{Error, Result};
use crate::util::{local_name, resolve_entity};

/// Does this archive member carry body text for the given format?
fn is_content_member(format: SourceFormat, name: &str) -> bool {
    match format {
        SourceFormat::WordXml => name == "word/document.xml",
        SourceFormat::WordLegacyXml => name.starts_with("Contents/section"),
        _ => false,
    }
}

fn expected_members(format: SourceFormat) -> &'static str {
    match format {
        SourceFormat::WordXml => "word/document.xml",
        _ => "Contents/section*.xml",
    }
}

pub(super) fn extract(path: &Path, format: SourceFormat) -> Result<String> {
    let file = std::fs::File::open(path)?;
    extract_from_reader(file, format)
}

/// Extract text from any [`Read`] + [`Seek`] archive source.
pub(super) fn extract_from_reader<R: Read + Seek>(reader: R, format: SourceFormat) -> Result<String> {
    let name = format.name();
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| Error::extraction(name, format!("not a valid zip archive: {e}")))?;

    let mut members: Vec<String> = archive
        .file_names()
        .filter(|member| is_content_member(format, member))
        .map(String::from)
        .collect();
    members.sort();

    if members.is_empty() {
        return Err(Error::extraction(
            name,
            format!("no {} found in archive", expected_members(format)),
        ));
    }

    let mut text = String::new();
    for member in &members {
        let mut xml = Vec::new();
        archive
            .by_name(member)
            .and_then(|mut entry| entry.read_to_end(&mut xml).map_err(Into::into))
            .map_err(|e| Error::extraction(name, format!("{member}: {e}")))?;

        tracing::debug!(member = %member, bytes = xml.len(), "reading content member");
        walk_xml(&xml, &mut text).map_err(|e| Error::extraction(name, format!("{member}: {e}")))?;
    }

    if text.trim().is_empty() {
        return Err(Error::extraction(name, "document is empty"));
    }
    Ok(text)
}

/// Append the text content of one XML document to `out`.
///
/// Text is only taken from inside `t` runs. `p` starts a new line, `br`,
/// `cr` and `lineBreak` insert one, `tab` inserts a tab. Tab stop
/// definitions (`tabs`) are not content. Run text that is not valid UTF-8
/// is an error.
fn walk_xml(xml: &[u8], out: &mut String) -> std::result::Result<(), quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut text_depth = 0usize;
    let mut tabs_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"t" => text_depth += 1,
                b"tabs" => tabs_depth += 1,
                name => push_break(name, tabs_depth, out),
            },
            Event::Empty(e) => push_break(local_name(e.name().as_ref()), tabs_depth, out),
            Event::End(e) => match local_name(e.name().as_ref()) {
                b"t" => text_depth = text_depth.saturating_sub(1),
                b"tabs" => tabs_depth = tabs_depth.saturating_sub(1),
                _ => {}
            },
            Event::Text(e) if text_depth > 0 => out.push_str(&e.decode()?),
            Event::CData(e) if text_depth > 0 => out.push_str(&e.decode()?),
            Event::GeneralRef(e) if text_depth > 0 => {
                if let Some(c) = resolve_entity(&e.decode()?) {
                    out.push(c);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn push_break(name: &[u8], tabs_depth: usize, out: &mut String) {
    match name {
        b"p" | b"br" | b"cr" | b"lineBreak" => out.push('\n'),
        b"tab" if tabs_depth == 0 => out.push('\t'),
        _ => {}
    }
}

//! EPUB 3 exporter.
//!
//! Packages a finalized [`BookModel`] with synthesized chapter documents.

use std::io::{self, Seek, Write};
use std::path::Path;

use chrono::SecondsFormat;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::model::BookModel;
use crate::util::escape_xml;

use super::Exporter;
use super::xhtml::{STYLESHEET_HREF, chapter_document, nav_document};

/// Configuration for EPUB export.
#[derive(Debug, Clone, Default)]
pub struct EpubConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// EPUB format exporter.
///
/// # Example
///
/// ```no_run
/// use folio::BookAssembler;
/// use folio::export::{EpubExporter, Exporter};
/// use std::fs::File;
///
/// let mut assembler = BookAssembler::new("제목", "작가");
/// assembler.add_chapter("1화", "본문");
/// let book = assembler.finalize();
///
/// let mut file = File::create("output.epub")?;
/// EpubExporter::new().export(&book, &mut file)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EpubExporter {
    config: EpubConfig,
}

impl EpubExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self {
            config: EpubConfig::default(),
        }
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: EpubConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for EpubExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for EpubExporter {
    fn export<W: Write + Seek>(&self, book: &BookModel, writer: &mut W) -> io::Result<()> {
        let mut zip = ZipWriter::new(writer);

        let compression_level = self.config.compression_level.unwrap_or(6);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level as i64));

        // 1. Write mimetype (must be first, uncompressed)
        zip.start_file("mimetype", stored).map_err(io_error)?;
        zip.write_all(b"application/epub+zip")?;

        // 2. Write container.xml
        zip.start_file("META-INF/container.xml", deflated)
            .map_err(io_error)?;
        zip.write_all(CONTAINER_XML)?;

        // 3. Build manifest and spine
        let mut manifest_items = vec![
            ManifestItem::new("nav", "nav.xhtml", "application/xhtml+xml").with_properties("nav"),
            ManifestItem::new("stylesheet", STYLESHEET_HREF, "text/css"),
        ];
        let mut spine_refs = vec!["nav".to_string()];

        for chapter in book.chapters() {
            let id = chapter.id().to_string();
            manifest_items.push(ManifestItem::new(
                &id,
                &chapter.id().file_name(),
                "application/xhtml+xml",
            ));
            spine_refs.push(id);
        }

        if let Some(cover) = book.cover() {
            manifest_items.push(
                ManifestItem::new(COVER_ID, &cover.file_name(), cover.format.mime_type())
                    .with_properties("cover-image"),
            );
        }

        // 4. Write content.opf
        let opf = generate_opf(book, &manifest_items, &spine_refs);
        zip.start_file("OEBPS/content.opf", deflated)
            .map_err(io_error)?;
        zip.write_all(opf.as_bytes())?;

        // 5. Write navigation (nav.xhtml for EPUB 3, toc.ncx for older readers)
        zip.start_file("OEBPS/nav.xhtml", deflated).map_err(io_error)?;
        zip.write_all(nav_document(book).as_bytes())?;

        zip.start_file("OEBPS/toc.ncx", deflated).map_err(io_error)?;
        zip.write_all(generate_ncx(book).as_bytes())?;

        // 6. Write stylesheet
        zip.start_file(format!("OEBPS/{STYLESHEET_HREF}"), deflated)
            .map_err(io_error)?;
        zip.write_all(book.stylesheet().as_bytes())?;

        // 7. Write chapters
        for chapter in book.chapters() {
            let zip_path = format!("OEBPS/{}", chapter.id().file_name());
            zip.start_file(zip_path, deflated).map_err(io_error)?;
            zip.write_all(chapter_document(chapter, book.language()).as_bytes())?;
        }

        // 8. Write cover image (already compressed)
        if let Some(cover) = book.cover() {
            zip.start_file(format!("OEBPS/{}", cover.file_name()), stored)
                .map_err(io_error)?;
            zip.write_all(&cover.data)?;
        }

        zip.finish().map_err(io_error)?;
        tracing::debug!(
            chapters = book.chapters().len(),
            cover = book.cover().is_some(),
            "wrote EPUB"
        );
        Ok(())
    }
}

/// Write `book` as an EPUB file at `path`.
pub fn write_epub<P: AsRef<Path>>(book: &BookModel, path: P) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    EpubExporter::new().export(book, &mut file)?;
    tracing::info!(path = %path.display(), "saved EPUB");
    Ok(())
}

/// Convert zip error to io error.
fn io_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::other(e)
}

const COVER_ID: &str = "cover-image";

/// Container.xml template.
const CONTAINER_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

struct ManifestItem {
    id: String,
    href: String,
    media_type: String,
    properties: Option<&'static str>,
}

impl ManifestItem {
    fn new(id: &str, href: &str, media_type: &str) -> Self {
        Self {
            id: id.to_string(),
            href: href.to_string(),
            media_type: media_type.to_string(),
            properties: None,
        }
    }

    fn with_properties(mut self, properties: &'static str) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Generate content.opf from the book and manifest.
fn generate_opf(book: &BookModel, manifest: &[ManifestItem], spine_refs: &[String]) -> String {
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
    );

    opf.push_str(&format!(
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
        escape_xml(book.identifier())
    ));
    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(book.title())
    ));
    opf.push_str(&format!(
        "    <dc:creator id=\"creator\">{}</dc:creator>\n",
        escape_xml(book.author())
    ));
    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(book.language())
    ));

    // dcterms:modified (required for EPUB3)
    opf.push_str(&format!(
        "    <meta property=\"dcterms:modified\">{}</meta>\n",
        book.modified().to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    if let Some(publisher) = book.publisher() {
        opf.push_str(&format!(
            "    <dc:publisher>{}</dc:publisher>\n",
            escape_xml(publisher)
        ));
    }

    // Series as an EPUB 3 collection, plus the calibre metas most readers use
    if let Some(series) = book.series() {
        let name = escape_xml(&series.name);
        opf.push_str(&format!(
            "    <meta property=\"belongs-to-collection\" id=\"series\">{name}</meta>\n"
        ));
        opf.push_str("    <meta refines=\"#series\" property=\"collection-type\">series</meta>\n");
        opf.push_str(&format!("    <meta name=\"calibre:series\" content=\"{name}\"/>\n"));
        if let Some(index) = series.index {
            opf.push_str(&format!(
                "    <meta refines=\"#series\" property=\"group-position\">{index}</meta>\n"
            ));
            opf.push_str(&format!(
                "    <meta name=\"calibre:series_index\" content=\"{index}\"/>\n"
            ));
        }
    }

    if book.cover().is_some() {
        opf.push_str(&format!("    <meta name=\"cover\" content=\"{COVER_ID}\"/>\n"));
    }

    opf.push_str("  </metadata>\n");

    // Manifest
    opf.push_str("  <manifest>\n");
    opf.push_str(
        "    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n",
    );
    for item in manifest {
        let properties = item
            .properties
            .map(|p| format!(" properties=\"{p}\""))
            .unwrap_or_default();
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"{}/>\n",
            escape_xml(&item.id),
            escape_xml(&item.href),
            escape_xml(&item.media_type),
            properties
        ));
    }
    opf.push_str("  </manifest>\n");

    // Spine
    opf.push_str("  <spine toc=\"ncx\">\n");
    for id in spine_refs {
        opf.push_str(&format!("    <itemref idref=\"{}\"/>\n", escape_xml(id)));
    }
    opf.push_str("  </spine>\n");

    opf.push_str("</package>\n");
    opf
}

/// Generate toc.ncx with one flat navPoint per chapter.
fn generate_ncx(book: &BookModel) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
    );
    ncx.push_str(&escape_xml(book.identifier()));
    ncx.push_str(
        r#""/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
    );
    ncx.push_str(&escape_xml(book.title()));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    for chapter in book.chapters() {
        let order = chapter.ordinal();
        ncx.push_str(&format!(
            "    <navPoint id=\"navPoint-{order}\" playOrder=\"{order}\">\n"
        ));
        ncx.push_str(&format!(
            "      <navLabel><text>{}</text></navLabel>\n",
            escape_xml(chapter.title())
        ));
        ncx.push_str(&format!(
            "      <content src=\"{}\"/>\n",
            chapter.id().file_name()
        ));
        ncx.push_str("    </navPoint>\n");
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

//! Shared helpers: text decoding, media sniffing and XML escaping.

use std::borrow::Cow;

use encoding_rs::Encoding;

// ============================================================================
// Text Decoding
// ============================================================================

/// Decode bytes to a string by trying candidate encodings in order.
///
/// This function:
/// 1. Honors a byte-order mark if one is present (UTF-8, UTF-16LE/BE)
/// 2. Otherwise returns the first candidate that decodes without errors
/// 3. Falls back to lossy UTF-8 with U+FFFD substitution
///
/// Returns the decoded text and the name of the encoding that produced it.
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let (text, name) = decode_text("안녕".as_bytes(), &[encoding_rs::UTF_8]);
/// assert_eq!(text, "안녕");
/// assert_eq!(name, "UTF-8");
/// ```
pub fn decode_text<'a>(
    bytes: &'a [u8],
    candidates: &[&'static Encoding],
) -> (Cow<'a, str>, &'static str) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, encoding.name());
    }

    for encoding in candidates {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return (text, encoding.name());
        }
    }

    (String::from_utf8_lossy(bytes), "UTF-8 (lossy)")
}

/// Resolve encoding labels ("utf-8", "euc-kr", "latin1", ...) to encodings.
///
/// Unknown labels are skipped and labels that resolve to an encoding already
/// in the list are dropped, so "windows-949" and "euc-kr" collapse into one
/// entry (encoding_rs decodes both with the same Unified Hangul Code table).
pub fn resolve_encodings<S: AsRef<str>>(labels: &[S]) -> Vec<&'static Encoding> {
    let mut encodings: Vec<&'static Encoding> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) if !encodings.contains(&encoding) => encodings.push(encoding),
            Some(_) => {}
            None => tracing::warn!(label, "ignoring unknown text encoding label"),
        }
    }
    encodings
}

// ============================================================================
// Resource Format Detection
// ============================================================================

/// Image formats accepted as cover art.
///
/// Detection is done via file extension or magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Jpeg,
    Png,
    Gif,
    /// SVG image (vector)
    Svg,
    WebP,
    /// Anything else
    Binary,
}

impl MediaFormat {
    /// Get the MIME type string for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "image/jpeg",
            MediaFormat::Png => "image/png",
            MediaFormat::Gif => "image/gif",
            MediaFormat::Svg => "image/svg+xml",
            MediaFormat::WebP => "image/webp",
            MediaFormat::Binary => "application/octet-stream",
        }
    }

    /// File extension used when packaging a resource of this format.
    pub fn extension(self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "jpg",
            MediaFormat::Png => "png",
            MediaFormat::Gif => "gif",
            MediaFormat::Svg => "svg",
            MediaFormat::WebP => "webp",
            MediaFormat::Binary => "bin",
        }
    }

    /// Look up a format by MIME type (case-insensitive, `image/jpg` accepted).
    pub fn from_mime_type(mime: &str) -> MediaFormat {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => MediaFormat::Jpeg,
            "image/png" => MediaFormat::Png,
            "image/gif" => MediaFormat::Gif,
            "image/svg+xml" => MediaFormat::Svg,
            "image/webp" => MediaFormat::WebP,
            _ => MediaFormat::Binary,
        }
    }

    /// Check if this format represents an image.
    pub fn is_image(self) -> bool {
        !matches!(self, MediaFormat::Binary)
    }
}

/// Detect resource format from file path and/or raw bytes.
///
/// Tries extension-based detection first, then falls back to magic bytes.
/// SVG without an extension is recognized by an `<svg` root near the start
/// of the data. Returns `Binary` if unknown.
pub fn detect_media_format(path: &str, data: &[u8]) -> MediaFormat {
    let path_lower = path.to_lowercase();

    if path_lower.ends_with(".jpg") || path_lower.ends_with(".jpeg") {
        return MediaFormat::Jpeg;
    }
    if path_lower.ends_with(".png") {
        return MediaFormat::Png;
    }
    if path_lower.ends_with(".gif") {
        return MediaFormat::Gif;
    }
    if path_lower.ends_with(".svg") {
        return MediaFormat::Svg;
    }
    if path_lower.ends_with(".webp") {
        return MediaFormat::WebP;
    }

    // Fallback to magic byte detection
    if data.len() >= 4 {
        // JPEG: FF D8 FF
        if data[0] == 0xFF && data[1] == 0xD8 {
            return MediaFormat::Jpeg;
        }
        // PNG: 89 50 4E 47 (.PNG)
        if data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47 {
            return MediaFormat::Png;
        }
        // GIF: 47 49 46 (GIF)
        if data[0] == 0x47 && data[1] == 0x49 && data[2] == 0x46 {
            return MediaFormat::Gif;
        }
        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return MediaFormat::WebP;
        }
    }

    if looks_like_svg(data) {
        return MediaFormat::Svg;
    }

    MediaFormat::Binary
}

/// Does `data` open with an SVG root, optionally after an XML prolog?
fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];

    if head.starts_with(b"<svg") {
        return true;
    }
    (head.starts_with(b"<?xml") || head.starts_with(b"<!DOCTYPE"))
        && memchr::memmem::find(head, b"<svg").is_some()
}

// ============================================================================
// XML
// ============================================================================

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Strip a namespace prefix from a qualified XML name (`hp:t` -> `t`).
pub fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve a general entity reference (`amp`, `#x41`, `#65`, ...).
pub fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => return Some('\''),
        "quot" => return Some('"'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "amp" => return Some('&'),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_prefers_utf8() {
        let (text, name) = decode_text("안녕하세요".as_bytes(), &[encoding_rs::UTF_8]);
        assert_eq!(text, "안녕하세요");
        assert_eq!(name, "UTF-8");
    }

    #[test]
    fn test_decode_text_falls_through_to_euc_kr() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("제 1 화 시작");
        let candidates = [encoding_rs::UTF_8, encoding_rs::EUC_KR];
        let (text, name) = decode_text(&bytes, &candidates);
        assert_eq!(text, "제 1 화 시작");
        assert_eq!(name, "EUC-KR");
    }

    #[test]
    fn test_decode_text_honors_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("hello".as_bytes());
        let (text, _) = decode_text(&bytes, &[encoding_rs::WINDOWS_1252]);
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_decode_text_lossy_fallback() {
        let (text, name) = decode_text(&[b'a', 0xFF, b'b'], &[encoding_rs::UTF_8]);
        assert_eq!(text, "a\u{FFFD}b");
        assert_eq!(name, "UTF-8 (lossy)");
    }

    #[test]
    fn test_resolve_encodings_dedupes_and_skips_unknown() {
        let encodings = resolve_encodings(&["utf-8", "windows-949", "euc-kr", "bogus", "latin1"]);
        assert_eq!(
            encodings,
            vec![encoding_rs::UTF_8, encoding_rs::EUC_KR, encoding_rs::WINDOWS_1252]
        );
    }

    #[test]
    fn test_detect_media_format_by_extension() {
        assert_eq!(detect_media_format("cover.jpg", &[]), MediaFormat::Jpeg);
        assert_eq!(detect_media_format("cover.JPEG", &[]), MediaFormat::Jpeg);
        assert_eq!(detect_media_format("cover.png", &[]), MediaFormat::Png);
        assert_eq!(detect_media_format("cover.webp", &[]), MediaFormat::WebP);
        assert_eq!(detect_media_format("notes.txt", &[]), MediaFormat::Binary);
    }

    #[test]
    fn test_detect_media_format_by_magic_bytes() {
        let png_data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_media_format("cover", &png_data), MediaFormat::Png);

        let jpeg_data = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(detect_media_format("cover", &jpeg_data), MediaFormat::Jpeg);
    }

    #[test]
    fn test_detect_svg_without_extension() {
        let bare = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        assert_eq!(detect_media_format("cover", bare), MediaFormat::Svg);

        let prolog = b"\xEF\xBB\xBF\n<?xml version=\"1.0\"?>\n<!DOCTYPE svg>\n<svg width=\"10\"/>";
        assert_eq!(detect_media_format("cover", prolog), MediaFormat::Svg);

        let other_xml = b"<?xml version=\"1.0\"?><html/>";
        assert_eq!(detect_media_format("cover", other_xml), MediaFormat::Binary);
    }

    #[test]
    fn test_media_format_from_mime_type() {
        assert_eq!(MediaFormat::from_mime_type("IMAGE/PNG"), MediaFormat::Png);
        assert_eq!(MediaFormat::from_mime_type("image/jpg"), MediaFormat::Jpeg);
        assert_eq!(MediaFormat::from_mime_type("text/plain"), MediaFormat::Binary);
        assert!(!MediaFormat::Binary.is_image());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_local_name_and_entities() {
        assert_eq!(local_name(b"hp:t"), b"t");
        assert_eq!(local_name(b"p"), b"p");
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("#xAC00"), Some('가'));
        assert_eq!(resolve_entity("#44032"), Some('가'));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}

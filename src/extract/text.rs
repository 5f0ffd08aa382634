//! Plain-text adapter.

use std::path::Path;

use encoding_rs::Encoding;

use crate::error::Result;
use crate::util::decode_text;

/// UTF-8, Windows-949, EUC-KR, ISO-8859-1, after label resolution.
pub(super) fn default_encodings() -> Vec<&'static Encoding> {
    crate::util::resolve_encodings(&["utf-8", "windows-949", "euc-kr", "iso-8859-1"])
}

/// Read and decode a text file. Never fails once the bytes are read.
pub(super) fn extract(path: &Path, encodings: &[&'static Encoding]) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let (text, encoding) = decode_text(&bytes, encodings);

    if encoding.ends_with("(lossy)") {
        tracing::warn!(path = %path.display(), "no candidate encoding matched, decoding lossily");
    } else {
        tracing::debug!(encoding, "decoded plain text");
    }

    Ok(text.into_owned())
}

//! Line-ending and encoding canonicalization.
//!
//! Every later stage splits on `\n` only, so this pass folds all other line
//! terminators into it and drops a stray byte-order mark left over from
//! decoding.

use std::borrow::Cow;

const BOM: char = '\u{FEFF}';

/// Canonicalize line terminators to `\n`.
///
/// Handles `\r\n`, lone `\r`, NEL (U+0085), LINE SEPARATOR (U+2028) and
/// PARAGRAPH SEPARATOR (U+2029). A leading U+FEFF is removed. Returns the
/// input unchanged (borrowed) when there is nothing to rewrite.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    if !needs_rewrite(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{0085}' | '\u{2028}' | '\u{2029}' => out.push('\n'),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn needs_rewrite(text: &str) -> bool {
    // NEL, LS and PS all encode with a 0xC2 or 0xE2 lead byte.
    let bytes = text.as_bytes();
    memchr::memchr(b'\r', bytes).is_some()
        || (memchr::memchr2(0xC2, 0xE2, bytes).is_some()
            && text.contains(['\u{0085}', '\u{2028}', '\u{2029}']))
}

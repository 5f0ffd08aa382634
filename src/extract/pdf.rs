//! PDF adapter using the `pdf-extract` crate.
//!
//! Only the text layer is read, one page at a time. Pages without text are
//! dropped and the rest are joined with a newline, so text at the top of a
//! page always starts a new line.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use crate::error::{Error, Result};

const FORMAT: &str = "PDF";

pub(super) fn extract(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;

    // pdf-extract panics on some malformed inputs.
    let pages = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&data)
    }))
    .map_err(|_| Error::extraction(FORMAT, "the PDF decoder crashed on this file"))?
    .map_err(|e| Error::extraction(FORMAT, e.to_string()))?;

    let text = join_pages(&pages);
    if text.trim().is_empty() {
        return Err(Error::extraction(
            FORMAT,
            "no text layer found; the PDF may contain only scanned images",
        ));
    }

    tracing::debug!(pages = pages.len(), chars = text.len(), "extracted PDF text");
    Ok(text)
}

/// Join non-empty pages with newlines.
fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

//! Legacy binary adapters (`.hwp`, `.doc`).

use std::path::Path;

use super::{Capabilities, LegacyKind};
use crate::error::{Error, Result};

pub(super) fn extract(path: &Path, kind: LegacyKind, capabilities: &Capabilities) -> Result<String> {
    match kind {
        LegacyKind::Doc => Err(Error::extraction(
            "DOC",
            "Word 97-2003 documents are not supported; save the file as .docx or .txt",
        )),
        LegacyKind::Hwp => {
            let decoder = capabilities
                .legacy_decoder()
                .ok_or_else(|| Error::MissingCapability {
                    format: "HWP",
                    capability: capabilities.legacy_program().to_string(),
                    hint: "install pyhwp (`pip install pyhwp`) or save the file as .hwpx".to_string(),
                })?;
            tracing::debug!(decoder = decoder.name(), "decoding legacy HWP");
            decoder.decode(path)
        }
    }
}

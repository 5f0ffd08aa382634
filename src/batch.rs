//! Parallel conversion of many documents.
//!
//! Each input is converted independently on the rayon pool. A failure is
//! recorded against its input and never stops the rest of the batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::export::write_epub;
use crate::pipeline::{BuildRequest, Pipeline};

/// Outcome for one input.
#[derive(Debug)]
pub struct BatchItem {
    pub input: PathBuf,
    /// Path of the written EPUB on success.
    pub result: Result<PathBuf>,
}

/// Per-input outcomes, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| item.result.is_err())
    }
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "book".to_string())
}

/// One distinct output path per input, in input order.
///
/// The first input with a given stem gets `<stem>.epub`; later inputs with
/// the same stem get `<stem>-2.epub`, `<stem>-3.epub` and so on. Names are
/// compared case-insensitively.
pub fn output_paths(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let stem = file_stem(input);
            let mut name = format!("{stem}.epub");
            let mut n = 1;
            while !taken.insert(name.to_lowercase()) {
                n += 1;
                name = format!("{stem}-{n}.epub");
            }
            output_dir.join(name)
        })
        .collect()
}

fn convert_one(pipeline: &Pipeline, input: &Path, output: &Path) -> Result<()> {
    let book = pipeline.build(&BuildRequest::new(input))?;
    write_epub(&book, output)?;
    Ok(())
}

/// Convert every input into `output_dir`, one EPUB per input.
///
/// Output names follow [`output_paths`], so inputs sharing a stem never
/// overwrite each other. Titles come from file stems and authors from the
/// pipeline's config.
pub fn convert_batch(pipeline: &Pipeline, inputs: &[PathBuf], output_dir: &Path) -> BatchReport {
    let outputs = output_paths(inputs, output_dir);
    let items: Vec<BatchItem> = inputs
        .par_iter()
        .zip(outputs)
        .map(|(input, output)| {
            let result = convert_one(pipeline, input, &output).map(|()| output);
            if let Err(e) = &result {
                tracing::warn!(input = %input.display(), error = %e, "conversion failed");
            }
            BatchItem {
                input: input.clone(),
                result,
            }
        })
        .collect();

    let report = BatchReport { items };
    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

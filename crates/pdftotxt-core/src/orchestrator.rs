use std::path::Path;

use crate::backend::PdfBackend;
use crate::scanner::scan_pdfs;
use crate::text::{expand_ligatures, join_pages};
use crate::writer::{output_path_for, write_text};
use crate::{ConvertError, FileError, FileOutcome, ProgressEvent, RunSummary};

/// Knobs for a conversion run. The default overwrites every output and
/// writes page text exactly as the backend produced it.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Leave PDFs alone whose `.txt` sibling already exists.
    pub skip_existing: bool,
    /// Replace typographic ligatures with their ASCII letters.
    pub expand_ligatures: bool,
}

/// Convert every PDF directly inside `dir` to a sibling `.txt` file.
///
/// Files are processed one at a time in scan order. A file that fails is
/// recorded in the summary and the run moves on to the next one; only
/// directory-level problems abort the run, and they do so before any
/// output is written.
pub fn convert_directory<F>(
    dir: &Path,
    backend: &dyn PdfBackend,
    options: &ConvertOptions,
    mut progress: F,
) -> Result<RunSummary, ConvertError>
where
    F: FnMut(ProgressEvent),
{
    let pdfs = scan_pdfs(dir)?;
    let total = pdfs.len();
    tracing::info!(dir = %dir.display(), total, "starting conversion");

    let mut summary = RunSummary::default();

    for (index, source) in pdfs.into_iter().enumerate() {
        progress(ProgressEvent::Started {
            index,
            total,
            source: source.clone(),
        });

        let output = output_path_for(&source);

        if options.skip_existing && output.exists() {
            tracing::debug!(source = %source.display(), "output exists, skipping");
            progress(ProgressEvent::Skipped {
                index,
                total,
                source: source.clone(),
                output: output.clone(),
            });
            summary.outcomes.push(FileOutcome::Skipped { source, output });
            continue;
        }

        match convert_file(&source, &output, backend, options) {
            Ok(pages) => {
                progress(ProgressEvent::Converted {
                    index,
                    total,
                    source: source.clone(),
                    output: output.clone(),
                    pages,
                });
                summary.outcomes.push(FileOutcome::Converted {
                    source,
                    output,
                    pages,
                });
            }
            Err(error) => {
                tracing::debug!(source = %source.display(), error = %error, "conversion failed");
                progress(ProgressEvent::Failed {
                    index,
                    total,
                    source: source.clone(),
                    error: error.to_string(),
                });
                summary.outcomes.push(FileOutcome::Failed { source, error });
            }
        }
    }

    tracing::info!(
        converted = summary.converted(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        "conversion finished"
    );

    Ok(summary)
}

/// Extract `source` through `backend` and write the joined text to `output`.
///
/// Returns the number of pages written. Nothing is written when extraction
/// fails.
pub fn convert_file(
    source: &Path,
    output: &Path,
    backend: &dyn PdfBackend,
    options: &ConvertOptions,
) -> Result<usize, FileError> {
    let pages = backend.extract_pages(source)?;
    tracing::debug!(source = %source.display(), pages = pages.len(), "extracted pages");

    let text = join_pages(&pages);
    let text = if options.expand_ligatures {
        expand_ligatures(&text)
    } else {
        text
    };

    write_text(output, &text).map_err(|e| FileError::Write {
        path: output.to_path_buf(),
        source: e,
    })?;

    Ok(pages.len())
}

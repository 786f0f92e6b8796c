use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::ConvertError;

/// Whether a file name ends in `.pdf`, ignoring case.
pub fn is_pdf_name(name: &OsStr) -> bool {
    name.to_string_lossy().to_lowercase().ends_with(".pdf")
}

/// List the PDF files directly inside `dir`.
///
/// Non-recursive. Only regular files (or symlinks to them) are returned;
/// a subdirectory called `scans.pdf` is not a candidate. The result is
/// sorted by file name so repeated runs report files in the same order.
pub fn scan_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let metadata = match std::fs::metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConvertError::DirectoryNotFound(dir.to_path_buf()));
        }
        Err(e) => return Err(ConvertError::Io(e)),
    };
    if !metadata.is_dir() {
        return Err(ConvertError::NotADirectory(dir.to_path_buf()));
    }

    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !is_pdf_name(&name) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        tracing::debug!(path = %path.display(), "found PDF");
        pdfs.push(path);
    }

    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

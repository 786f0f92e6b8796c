use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod orchestrator;
pub mod scanner;
pub mod text;
pub mod writer;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use orchestrator::{ConvertOptions, convert_directory, convert_file};
pub use scanner::{is_pdf_name, scan_pdfs};
pub use text::{expand_ligatures, join_pages};
pub use writer::{output_path_for, write_text};

/// Errors that stop a run before any file is converted.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single PDF could not be converted.
#[derive(Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What happened to one PDF during a run.
#[derive(Debug)]
pub enum FileOutcome {
    Converted {
        source: PathBuf,
        output: PathBuf,
        pages: usize,
    },
    /// The output already existed and skip-existing was on.
    Skipped { source: PathBuf, output: PathBuf },
    Failed { source: PathBuf, error: FileError },
}

impl FileOutcome {
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Converted { source, .. }
            | FileOutcome::Skipped { source, .. }
            | FileOutcome::Failed { source, .. } => source,
        }
    }
}

/// Per-file outcomes of one run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Converted { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Progress events emitted during [`convert_directory`].
///
/// `index` is 0-based; `total` is the number of PDFs found by the scan.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        index: usize,
        total: usize,
        source: PathBuf,
    },
    Converted {
        index: usize,
        total: usize,
        source: PathBuf,
        output: PathBuf,
        pages: usize,
    },
    Skipped {
        index: usize,
        total: usize,
        source: PathBuf,
        output: PathBuf,
    },
    Failed {
        index: usize,
        total: usize,
        source: PathBuf,
        error: String,
    },
}

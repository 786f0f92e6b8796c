use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level "open PDF → ordered page texts" step;
/// joining, writing and per-file bookkeeping live in
/// [`crate::orchestrator::convert_directory`].
pub trait PdfBackend: Send + Sync {
    /// Extract the plain text of every page, in document order.
    ///
    /// Pages without text yield an empty string rather than being omitted.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError>;
}

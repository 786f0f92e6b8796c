use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pdftotxt_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// so that the scanning and orchestration code does not transitively
/// depend on it.
///
/// Every text block on a page is kept by default. Header and footer bands
/// can be cut off with [`MupdfBackend::with_header_exclusion`] and
/// [`MupdfBackend::with_footer_exclusion`] for documents that repeat page
/// numbers or letterheads on every page.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    /// `None` disables footer exclusion.
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    /// `None` disables header exclusion.
    header_exclusion_ratio: Option<f32>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::OpenError(e.to_string()))?
        {
            return Err(BackendError::OpenError("document is encrypted".into()));
        }

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let page_bounds = page
                .bounds()
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let page_height = page_bounds.y1 - page_bounds.y0;

            let header_threshold = self
                .header_exclusion_ratio
                .map(|r| page_bounds.y0 + page_height * r);
            let footer_threshold = self
                .footer_exclusion_ratio
                .map(|r| page_bounds.y1 - page_height * r);

            // Block/line iteration, one line of output per text line
            let mut page_text = String::new();
            for block in text_page.blocks() {
                let block_bounds = block.bounds();

                // Blocks entirely within the header band
                if let Some(threshold) = header_threshold {
                    if block_bounds.y1 <= threshold {
                        continue;
                    }
                }

                // Blocks whose top edge is in the footer band
                if let Some(threshold) = footer_threshold {
                    if block_bounds.y0 >= threshold {
                        continue;
                    }
                }

                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        tracing::debug!(path = %path.display(), pages = pages_text.len(), "mupdf extraction done");
        Ok(pages_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_ratios_default_off() {
        let backend = MupdfBackend::new();
        assert!(backend.header_exclusion_ratio.is_none());
        assert!(backend.footer_exclusion_ratio.is_none());
    }

    #[test]
    fn zero_ratio_disables_exclusion() {
        let backend = MupdfBackend::new()
            .with_header_exclusion(0.04)
            .with_footer_exclusion(0.05);
        assert_eq!(backend.header_exclusion_ratio, Some(0.04));
        assert_eq!(backend.footer_exclusion_ratio, Some(0.05));

        let backend = backend.with_header_exclusion(0.0).with_footer_exclusion(-1.0);
        assert!(backend.header_exclusion_ratio.is_none());
        assert!(backend.footer_exclusion_ratio.is_none());
    }
}

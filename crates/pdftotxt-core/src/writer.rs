use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling `.txt` path for a source PDF: `a.PDF` → `a.txt`.
pub fn output_path_for(source: &Path) -> PathBuf {
    source.with_extension("txt")
}

/// Create or truncate `path` and write `text` to it as UTF-8.
///
/// Not atomic: a crash mid-write can leave a truncated file behind.
pub fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}

//! PDF text extraction
//!
//! Thin wrapper over `pdf-extract`. The rest of the pipeline only consumes
//! page-ordered plain text; all binary-format parsing is delegated here.

use anyhow::{Context, Result};
use std::path::Path;

/// Extract page-ordered plain text from a PDF file
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read PDF file: {}", path.display()))?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = extract_text(Path::new("/nonexistent/lecture.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-pdf.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert!(extract_text(&path).is_err());
    }
}

use std::path::Path;
use std::fs;
use anyhow::{Result, Context};
use log::debug;

/// File name suffix of report-card documents
pub const PDF_SUFFIX: &str = ".pdf";

/// Create a directory if it doesn't exist
pub fn ensure_dir_exists(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.as_os_str().is_empty() && !dir.exists() {
        debug!("Creating directory: {}", dir.display());
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

/// Check if a file name ends with `suffix`, compared case-sensitively
pub fn has_suffix(path: impl AsRef<Path>, suffix: &str) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}

/// Read a file to string with better error handling
pub fn read_file_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))
}

/// Write a string to a file, creating its parent directory first
pub fn write_string_to_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_suffix_is_case_sensitive() {
        assert!(has_suffix("cards/term1.pdf", PDF_SUFFIX));
        assert!(!has_suffix("cards/term1.PDF", PDF_SUFFIX));
        assert!(!has_suffix("cards/term1.pdf.bak", PDF_SUFFIX));
        assert!(has_suffix(".pdf", PDF_SUFFIX));
    }

    #[test]
    fn test_write_creates_parent() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("a").join("b").join("out.json");
        write_string_to_file(&path, "{}")?;
        assert_eq!(read_file_to_string(&path)?, "{}");
        Ok(())
    }
}

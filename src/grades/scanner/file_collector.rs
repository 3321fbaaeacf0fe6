use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{debug, trace};
use walkdir::WalkDir;

use crate::utils::file_utils;

/// File collector for finding report-card PDFs
#[derive(Debug)]
pub struct FileCollector {
    /// Case-sensitive file name suffix to collect
    suffix: String,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileCollector {
    /// Create a new file collector for `.pdf` files
    pub fn new() -> Self {
        Self {
            suffix: file_utils::PDF_SUFFIX.to_string(),
        }
    }

    /// Collect matching files directly inside `input_dir`, sorted by file name
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        debug!("Collecting files from directory: {}", input_dir.display());

        let mut files = Vec::new();

        for entry in WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to read input directory {}", input_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if file_utils::has_suffix(entry.path(), &self.suffix) {
                trace!("Found file: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }
}

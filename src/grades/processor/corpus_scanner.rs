use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info, warn};

use crate::grades::processor::{DocumentAggregator, ScanStats};
use crate::grades::scanner::{FileCollector, GradeExtractor, GradePatterns, ProgressTracker};
use crate::grades::types::{AggregationPolicy, GradeScanResult, ScanOptions, SubjectGrades};

/// Scans a directory of report cards and combines their grades
#[derive(Debug)]
pub struct CorpusScanner {
    /// Configuration options for scanning
    options: ScanOptions,

    /// Per-document grade collection
    aggregator: DocumentAggregator,

    /// File collector for finding report cards
    file_collector: FileCollector,

    /// Progress tracker for displaying progress
    progress_tracker: ProgressTracker,
}

impl CorpusScanner {
    /// Create a new scanner, compiling the configured grade patterns
    pub fn new(options: ScanOptions) -> Result<Self> {
        let patterns = GradePatterns::from_options(&options)?;
        Ok(Self {
            aggregator: DocumentAggregator::new(GradeExtractor::new(patterns)),
            file_collector: FileCollector::new(),
            progress_tracker: ProgressTracker::new(options.show_progress),
            options,
        })
    }

    /// Create a new scanner with default options
    pub fn with_defaults() -> Result<Self> {
        Self::new(ScanOptions::default())
    }

    /// Scan the configured input directory
    pub fn scan(&self) -> Result<GradeScanResult> {
        self.scan_directory(&self.options.input_dir)
    }

    /// Scan every `.pdf` file directly inside `input_dir`
    pub fn scan_directory(&self, input_dir: impl AsRef<Path>) -> Result<GradeScanResult> {
        let input_dir = input_dir.as_ref();
        info!("Scanning directory: {}", input_dir.display());

        let files = self.file_collector.collect_files(input_dir)?;
        info!("Found {} files to process", files.len());

        self.process_files(&files)
    }

    /// Process files in order and combine their grades under the configured policy
    pub fn process_files(&self, files: &[PathBuf]) -> Result<GradeScanResult> {
        let files = match self.options.max_files {
            Some(max_files) if files.len() > max_files => {
                warn!("Limiting to {} files out of {}", max_files, files.len());
                &files[..max_files]
            }
            _ => files,
        };

        let mut grades = SubjectGrades::new();
        let mut stats = ScanStats::new();
        let mut documents = Vec::with_capacity(files.len());

        self.progress_tracker.track_path_progress(files, |file| {
            let document = self.aggregator.aggregate_file(file)?;
            stats.merge(&document.stats);
            documents.push(document.path);

            match self.options.policy {
                AggregationPolicy::LastDocument => {
                    if !grades.is_empty() {
                        debug!("Replacing grades of the previous document with {}", file.display());
                    }
                    grades = document.grades;
                }
                AggregationPolicy::Accumulate => grades.extend(document.grades),
            }
            Ok(())
        })?;

        info!(
            "Processed {} files, found {} grades ({} retained)",
            stats.documents,
            stats.total_grades(),
            grades.len()
        );

        Ok(GradeScanResult {
            documents,
            grades,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_gives_empty_grades() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let scanner = CorpusScanner::with_defaults()?;
        let result = scanner.scan_directory(dir.path())?;
        assert!(result.documents.is_empty());
        assert!(result.grades.is_empty());
        assert_eq!(result.stats, ScanStats::new());
        Ok(())
    }

    #[test]
    fn test_corrupt_pdf_aborts_the_scan() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("broken.pdf"), b"not a pdf")?;
        let scanner = CorpusScanner::with_defaults()?;
        assert!(scanner.scan_directory(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let options = ScanOptions {
            language_pattern: "(".to_string(),
            ..ScanOptions::default()
        };
        assert!(CorpusScanner::new(options).is_err());
    }
}

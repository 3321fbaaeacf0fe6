use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

use crate::grades::processor::ScanStats;
use crate::grades::types::{AggregationPolicy, GradeCountTable, GradeScanResult, SubjectGrades};
use crate::utils::file_utils;

/// Machine-readable record of a scan
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the scanner that produced the report
    pub version: String,

    /// How grades from several documents were combined
    pub policy: AggregationPolicy,

    /// Documents scanned, in scan order
    pub documents: Vec<PathBuf>,

    /// Grades counted, as captured from the documents
    pub grades: SubjectGrades,

    /// Base-grade counts per subject
    pub counts: GradeCountTable,

    /// Statistics over the whole scan
    pub stats: ScanStats,
}

impl JsonReport {
    pub fn new(result: &GradeScanResult, counts: &GradeCountTable, policy: AggregationPolicy) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            policy,
            documents: result.documents.clone(),
            grades: result.grades.clone(),
            counts: counts.clone(),
            stats: result.stats.clone(),
        }
    }
}

/// Saves a [`JsonReport`] to disk
#[derive(Debug)]
pub struct JsonReportWriter {
    /// Path to the report file
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Save the report, creating the parent directory if needed
    pub fn save(&self, report: &JsonReport) -> Result<()> {
        let path = &self.path;
        debug!("Saving JSON report to {}", path.display());

        let content = serde_json::to_string_pretty(report)
            .context("Failed to serialize JSON report")?;
        file_utils::write_string_to_file(path, &content)?;

        info!("Saved JSON report with {} documents to {}", report.documents.len(), path.display());
        Ok(())
    }
}

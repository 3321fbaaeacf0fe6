use anyhow::{Context, Result};
use log::info;

use crate::grades::processor::{CorpusScanner, GradeSummarizer};
use crate::grades::types::{GradeCountTable, GradeScanResult, ScanOptions};
use crate::report::{JsonReport, JsonReportWriter, ReportWriter};

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Grades and statistics from the scan
    pub scan: GradeScanResult,

    /// Base-grade counts written to the CSV
    pub counts: GradeCountTable,
}

/// Scan the input directory, summarize the grades and write the reports
pub fn run(options: &ScanOptions) -> Result<RunOutcome> {
    let scanner = CorpusScanner::new(options.clone())?;
    let mut scan = scanner.scan()?;

    let summary = GradeSummarizer::new().summarize(&scan.grades);
    scan.stats.ignored_grades = summary.ignored;

    let raw = serde_json::to_string(&scan.grades).context("Failed to format extracted grades")?;
    println!(
        "Extracted grades, writing to {}...\n{}",
        options.output_file.display(),
        raw
    );

    ReportWriter::new(&options.output_file).write(&summary.counts)?;

    if let Some(path) = &options.json_report {
        let report = JsonReport::new(&scan, &summary.counts, options.policy);
        JsonReportWriter::new(path).save(&report)?;
    }

    let stats = &scan.stats;
    info!(
        "Scanned {} documents, {} pages ({} skipped, {} unreadable), {} grades ({} ignored)",
        stats.documents,
        stats.pages,
        stats.skipped_pages,
        stats.unreadable_pages,
        stats.total_grades(),
        stats.ignored_grades
    );

    Ok(RunOutcome {
        scan,
        counts: summary.counts,
    })
}

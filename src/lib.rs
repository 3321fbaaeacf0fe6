pub mod app;
pub mod grades;
pub mod report;
pub mod utils;

// Re-export main types and functions for easier access
pub use app::{run, RunOutcome};
pub use grades::types::{
    AggregationPolicy, BaseGrade, GradeCountTable, GradeScanResult, GradeToken, ScanOptions,
    Subject, SubjectGrades,
};
pub use grades::scanner::{GradeExtractor, GradePatterns};
pub use grades::processor::{CorpusScanner, DocumentAggregator, GradeSummarizer, ScanStats};
pub use report::{JsonReportWriter, ReportWriter};

// Re-export utility functions
pub use utils::file_utils;

pub mod types;
pub mod scanner;
pub mod processor;

// Re-export the main API for easier access
pub use types::{
    AggregationPolicy, BaseGrade, GradeCountTable, GradeScanResult, GradeToken, ScanOptions,
    Subject, SubjectGrades,
};
pub use scanner::{GradeExtractor, GradePatterns};
pub use processor::{CorpusScanner, GradeSummarizer};

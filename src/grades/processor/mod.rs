mod corpus_scanner;
mod document;
mod stats;
mod summarizer;

// Re-export from submodules
pub use corpus_scanner::CorpusScanner;
pub use document::DocumentAggregator;
pub use stats::ScanStats;
pub use summarizer::{GradeSummarizer, GradeSummary};

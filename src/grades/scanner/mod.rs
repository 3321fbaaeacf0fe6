mod extractor;
mod file_collector;
mod pdf_reader;
mod progress;

// Re-export from submodules
pub use extractor::{GradeExtractor, GradePatterns};
pub use file_collector::FileCollector;
pub use pdf_reader::{PageText, PageTextSource, PdfDocument};
pub use progress::ProgressTracker;

pub mod writer;
pub mod json;

// Re-export main types and functions for easier access
pub use writer::ReportWriter;
pub use json::{JsonReport, JsonReportWriter};

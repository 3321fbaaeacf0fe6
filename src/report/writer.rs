use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::grades::types::{BaseGrade, GradeCountTable, Subject};

/// Label of the first CSV column
const SUBJECT_HEADER: &str = "Subject";

/// Record terminator used by standard CSV writers
const LINE_TERMINATOR: &str = "\r\n";

/// Writes the grade counts as a CSV table
#[derive(Debug)]
pub struct ReportWriter {
    /// Destination of the CSV file
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Render the table: a header row, then Mathematics and Language rows
    pub fn render(table: &GradeCountTable) -> String {
        let mut out = String::new();

        let header: Vec<String> = std::iter::once(SUBJECT_HEADER.to_string())
            .chain(BaseGrade::ALL.iter().map(BaseGrade::to_string))
            .collect();
        out.push_str(&header.join(","));
        out.push_str(LINE_TERMINATOR);

        for subject in Subject::REPORT_ORDER {
            let row: Vec<String> = std::iter::once(subject.name().to_string())
                .chain(table.row(subject).iter().map(usize::to_string))
                .collect();
            out.push_str(&row.join(","));
            out.push_str(LINE_TERMINATOR);
        }

        out
    }

    /// Create or overwrite the CSV file; the parent directory must exist
    pub fn write(&self, table: &GradeCountTable) -> Result<()> {
        let path = &self.path;
        debug!("Writing grade counts to {}", path.display());

        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(Self::render(table).as_bytes())
            .and_then(|_| writer.flush())
            .with_context(|| format!("Failed to write report file {}", path.display()))?;

        info!("Wrote grade counts to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_order() {
        let mut table = GradeCountTable::new();
        // Language first to show insertion order has no effect on row order.
        table.increment(Subject::Language, BaseGrade::I);
        table.increment(Subject::Language, BaseGrade::A);
        table.increment(Subject::Mathematics, BaseGrade::B);
        table.increment(Subject::Mathematics, BaseGrade::B);

        assert_eq!(
            ReportWriter::render(&table),
            "Subject,A,B,C,D,R,I\r\nMathematics,0,2,0,0,0,0\r\nLanguage,1,0,0,0,0,1\r\n"
        );
    }

    #[test]
    fn test_write_overwrites() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("grades.csv");
        std::fs::write(&path, "stale content that is longer than the report itself\n".repeat(10))?;

        ReportWriter::new(&path).write(&GradeCountTable::new())?;
        let written = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec!["Subject,A,B,C,D,R,I", "Mathematics,0,0,0,0,0,0", "Language,0,0,0,0,0,0"]
        );
        Ok(())
    }

    #[test]
    fn test_missing_parent_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grades.csv");
        assert!(ReportWriter::new(&path).write(&GradeCountTable::new()).is_err());
        assert!(!dir.path().join("missing").exists());
    }
}

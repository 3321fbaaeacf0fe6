use serde::Serialize;

use crate::grades::types::Subject;

/// Statistics for grade scanning
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Number of documents scanned
    pub documents: usize,

    /// Total number of pages visited
    pub pages: usize,

    /// Pages skipped because they mention neither subject
    pub skipped_pages: usize,

    /// Pages whose text could not be extracted
    pub unreadable_pages: usize,

    /// Language grades found
    pub language_grades: usize,

    /// Mathematics grades found
    pub mathematics_grades: usize,

    /// Grades dropped by the summary for an unrecognized base grade
    pub ignored_grades: usize,
}

impl ScanStats {
    /// Create a new scan stats instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grade found for `subject`
    pub fn record_grade(&mut self, subject: Subject) {
        match subject {
            Subject::Language => self.language_grades += 1,
            Subject::Mathematics => self.mathematics_grades += 1,
        }
    }

    /// Merge another stats instance into this one
    pub fn merge(&mut self, other: &Self) {
        self.documents += other.documents;
        self.pages += other.pages;
        self.skipped_pages += other.skipped_pages;
        self.unreadable_pages += other.unreadable_pages;
        self.language_grades += other.language_grades;
        self.mathematics_grades += other.mathematics_grades;
        self.ignored_grades += other.ignored_grades;
    }

    /// Total grades found over both subjects
    pub fn total_grades(&self) -> usize {
        self.language_grades + self.mathematics_grades
    }

    /// Pages that went through grade extraction
    pub fn scanned_pages(&self) -> usize {
        self.pages - self.skipped_pages - self.unreadable_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut total = ScanStats { documents: 1, pages: 3, skipped_pages: 1, ..ScanStats::new() };
        let mut other = ScanStats { documents: 1, pages: 2, unreadable_pages: 1, ..ScanStats::new() };
        other.record_grade(Subject::Mathematics);
        other.record_grade(Subject::Language);

        total.merge(&other);
        assert_eq!(total.documents, 2);
        assert_eq!(total.pages, 5);
        assert_eq!(total.scanned_pages(), 3);
        assert_eq!(total.unreadable_pages, 1);
        assert_eq!(total.total_grades(), 2);
    }
}

use std::path::Path;

use anyhow::Result;
use log::{debug, trace};

use crate::grades::processor::ScanStats;
use crate::grades::scanner::{GradeExtractor, PageTextSource, PdfDocument};
use crate::grades::types::{DocumentGrades, SubjectGrades};

/// Collects the grades of every page of one document
#[derive(Debug, Clone)]
pub struct DocumentAggregator {
    extractor: GradeExtractor,
}

impl DocumentAggregator {
    pub fn new(extractor: GradeExtractor) -> Self {
        Self { extractor }
    }

    /// Load a PDF and collect its grades
    pub fn aggregate_file(&self, path: impl AsRef<Path>) -> Result<DocumentGrades> {
        let path = path.as_ref();
        let document = PdfDocument::load(path)?;
        debug!("{} has {} pages", path.display(), document.page_count());

        let (grades, stats) = self.aggregate_pages(&document);
        debug!(
            "Found {} Language and {} Mathematics grades in {}",
            stats.language_grades,
            stats.mathematics_grades,
            path.display()
        );

        Ok(DocumentGrades {
            path: path.to_path_buf(),
            grades,
            stats,
        })
    }

    /// Visit every page in order and collect grades per subject
    pub fn aggregate_pages<S: PageTextSource>(&self, source: &S) -> (SubjectGrades, ScanStats) {
        let mut grades = SubjectGrades::new();
        let mut stats = ScanStats {
            documents: 1,
            ..ScanStats::new()
        };

        for page in source.pages() {
            stats.pages += 1;
            if !page.extracted {
                stats.unreadable_pages += 1;
                continue;
            }
            let Some(observations) = self.extractor.extract_page(&page.text) else {
                trace!("Skipping page {}: no subject headings", page.number);
                stats.skipped_pages += 1;
                continue;
            };

            for observation in observations {
                trace!(
                    "Page {} line {}: {} {}",
                    page.number, observation.line, observation.subject, observation.grade
                );
                stats.record_grade(observation.subject);
                grades.push(observation.subject, observation.grade);
            }
        }

        (grades, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::scanner::{GradePatterns, PageText};
    use crate::grades::types::{GradeToken, ScanOptions, Subject};
    use pretty_assertions::assert_eq;

    /// Pages held in memory, `None` standing for an unreadable page
    struct MemoryPages(Vec<Option<&'static str>>);

    impl PageTextSource for MemoryPages {
        fn page_count(&self) -> usize {
            self.0.len()
        }

        fn pages(&self) -> impl Iterator<Item = PageText> + '_ {
            self.0.iter().zip(1..).map(|(text, number)| match text {
                Some(text) => PageText::new(number, *text),
                None => PageText::unreadable(number),
            })
        }
    }

    fn aggregator() -> DocumentAggregator {
        let patterns = GradePatterns::from_options(&ScanOptions::default()).unwrap();
        DocumentAggregator::new(GradeExtractor::new(patterns))
    }

    fn tokens(raw: &[&str]) -> Vec<GradeToken> {
        raw.iter().map(|r| GradeToken::new(*r)).collect()
    }

    #[test]
    fn test_grades_accumulate_across_pages() {
        let pages = MemoryPages(vec![
            Some("Language\nIEPA+Literacy Connections and Applications"),
            Some("Cover page"),
            None,
            Some("Mathematics\nESL/ELD\nIEP\nFrenchB\nLanguage\nIEPR-Literacy Connections and Applications"),
        ]);

        let (grades, stats) = aggregator().aggregate_pages(&pages);
        assert_eq!(grades.get(Subject::Language), tokens(&["A+", "R-"]).as_slice());
        assert_eq!(grades.get(Subject::Mathematics), tokens(&["B"]).as_slice());

        assert_eq!(stats.documents, 1);
        assert_eq!(stats.pages, 4);
        assert_eq!(stats.skipped_pages, 1);
        assert_eq!(stats.unreadable_pages, 1);
        assert_eq!(stats.scanned_pages(), 2);
        assert_eq!(stats.language_grades, 2);
        assert_eq!(stats.mathematics_grades, 1);
    }

    #[test]
    fn test_window_does_not_span_pages() {
        let pages = MemoryPages(vec![
            Some("Mathematics\nESL/ELD"),
            Some("IEP\nFrenchA"),
        ]);
        let (grades, _) = aggregator().aggregate_pages(&pages);
        assert!(grades.is_empty());
    }

    #[test]
    fn test_document_without_pages() {
        let (grades, stats) = aggregator().aggregate_pages(&MemoryPages(Vec::new()));
        assert!(grades.is_empty());
        assert_eq!(stats.pages, 0);
    }
}

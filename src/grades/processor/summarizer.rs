use log::debug;

use crate::grades::types::{GradeCountTable, SubjectGrades};

/// Reduces raw grades to counts of base grades
#[derive(Debug, Default, Clone, Copy)]
pub struct GradeSummarizer;

/// Counts together with the number of grades left out of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSummary {
    pub counts: GradeCountTable,
    pub ignored: usize,
}

impl GradeSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Count base grades per subject; modifiers are dropped and grades
    /// outside the alphabet are left out
    pub fn summarize(&self, grades: &SubjectGrades) -> GradeSummary {
        let mut counts = GradeCountTable::new();
        let mut ignored = 0;

        for (subject, tokens) in grades.iter() {
            for token in tokens {
                match token.base_grade() {
                    Some(base) => counts.increment(subject, base),
                    None => {
                        debug!("Ignoring unrecognized {} grade {:?}", subject, token.as_str());
                        ignored += 1;
                    }
                }
            }
        }

        GradeSummary { counts, ignored }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::types::{BaseGrade, GradeToken, Subject};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_modifiers_share_a_counter() {
        let mut grades = SubjectGrades::new();
        grades.push(Subject::Language, GradeToken::new("C"));
        grades.push(Subject::Language, GradeToken::new("C+"));
        grades.push(Subject::Language, GradeToken::new("Z"));

        let summary = GradeSummarizer::new().summarize(&grades);
        assert_eq!(summary.counts.count(Subject::Language, BaseGrade::C), 2);
        assert_eq!(summary.counts.subject_total(Subject::Language), 2);
        assert_eq!(summary.ignored, 1);
    }

    #[test]
    fn test_subjects_are_counted_separately() {
        let mut grades = SubjectGrades::new();
        grades.push(Subject::Language, GradeToken::new("A-"));
        grades.push(Subject::Mathematics, GradeToken::new("I"));
        grades.push(Subject::Mathematics, GradeToken::new("R+"));

        let counts = GradeSummarizer::new().summarize(&grades).counts;
        assert_eq!(counts.row(Subject::Language), [1, 0, 0, 0, 0, 0]);
        assert_eq!(counts.row(Subject::Mathematics), [0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_no_grades_gives_full_zero_table() {
        let summary = GradeSummarizer::new().summarize(&SubjectGrades::new());
        assert_eq!(summary.counts, GradeCountTable::new());
        for subject in Subject::ALL {
            for grade in BaseGrade::ALL {
                assert_eq!(summary.counts.count(subject, grade), 0);
            }
        }
        assert_eq!(summary.ignored, 0);
    }
}

use anyhow::{Context, Result, bail};
use log::trace;
use regex::Regex;

use crate::grades::types::{GradeToken, Observation, ScanOptions, Subject};

/// Labels that must appear on the three lines above a Mathematics grade
const MATHEMATICS_WINDOW_LABELS: [&str; 3] = ["Mathematics", "ESL/ELD", "IEP"];

/// Compiled matchers for the two grade lines
#[derive(Debug, Clone)]
pub struct GradePatterns {
    /// Matches a whole Language grade line
    language: Regex,

    /// Matches the grade line closing a Mathematics window
    mathematics: Regex,
}

impl GradePatterns {
    /// Compile the patterns configured in `options`
    pub fn from_options(options: &ScanOptions) -> Result<Self> {
        Ok(Self {
            language: compile_grade_pattern("language", &options.language_pattern)?,
            mathematics: compile_grade_pattern("mathematics", &options.mathematics_pattern)?,
        })
    }

    /// Grade captured from a Language line, if the line is one
    pub fn language_grade(&self, line: &str) -> Option<GradeToken> {
        capture_grade(&self.language, line)
    }

    /// Grade captured from the last line of a Mathematics window
    pub fn mathematics_grade(&self, line: &str) -> Option<GradeToken> {
        capture_grade(&self.mathematics, line)
    }
}

fn compile_grade_pattern(name: &str, pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern)
        .with_context(|| format!("Invalid {} grade pattern: {}", name, pattern))?;
    if regex.captures_len() < 2 {
        bail!("The {} grade pattern must capture the grade in a group: {}", name, pattern);
    }
    Ok(regex)
}

fn capture_grade(regex: &Regex, line: &str) -> Option<GradeToken> {
    let caps = regex.captures(line)?;
    // Only matches at the very start of the line count.
    if caps.get(0)?.start() != 0 {
        return None;
    }
    caps.get(1).map(|m| GradeToken::new(m.as_str()))
}

/// Finds subject grades in the text of a single page
#[derive(Debug, Clone)]
pub struct GradeExtractor {
    patterns: GradePatterns,
}

impl GradeExtractor {
    pub fn new(patterns: GradePatterns) -> Self {
        Self { patterns }
    }

    /// Cheap pre-filter: pages mentioning neither subject carry no grades
    fn is_candidate_page(text: &str) -> bool {
        Subject::ALL.iter().any(|subject| text.contains(subject.name()))
    }

    /// Extract every grade on the page, in line order.
    ///
    /// Returns `None` when the page mentions neither subject and was skipped.
    pub fn extract_page(&self, text: &str) -> Option<Vec<Observation>> {
        if !Self::is_candidate_page(text) {
            return None;
        }

        let lines: Vec<&str> = text.lines().collect();
        let mut observations = self.language_grades(&lines);
        observations.extend(self.mathematics_grades(&lines));
        observations.sort_by_key(|o| o.line);

        trace!("Extracted {} grades from page", observations.len());
        Some(observations)
    }

    fn language_grades(&self, lines: &[&str]) -> Vec<Observation> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                self.patterns.language_grade(line).map(|grade| Observation {
                    subject: Subject::Language,
                    grade,
                    line: index,
                })
            })
            .collect()
    }

    fn mathematics_grades(&self, lines: &[&str]) -> Vec<Observation> {
        lines
            .windows(4)
            .enumerate()
            .filter(|(_, window)| {
                MATHEMATICS_WINDOW_LABELS
                    .iter()
                    .zip(window.iter())
                    .all(|(label, line)| line.contains(label))
            })
            .filter_map(|(start, window)| {
                self.patterns.mathematics_grade(window[3]).map(|grade| Observation {
                    subject: Subject::Mathematics,
                    grade,
                    line: start + 3,
                })
            })
            .collect()
    }
}

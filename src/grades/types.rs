use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::grades::processor::ScanStats;
use crate::utils::file_utils;

/// Default input directory scanned for report cards
pub const DEFAULT_INPUT_DIR: &str = "data/input";

/// Default destination of the CSV summary
pub const DEFAULT_OUTPUT_FILE: &str = "data/output/grades.csv";

/// Language grade line: `IEP<grade>Literacy Connections and Applications`
pub const DEFAULT_LANGUAGE_PATTERN: &str =
    r"^IEP([ABCDRI][+-]?)Literacy Connections and Applications";

/// Mathematics grade line, the last line of the four-line window
pub const DEFAULT_MATHEMATICS_PATTERN: &str = r"^French([ABCDRI][+-]?)";

/// Subject a grade was reported for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Language,
    Mathematics,
}

impl Subject {
    /// Processing order
    pub const ALL: [Subject; 2] = [Subject::Language, Subject::Mathematics];

    /// Row order of the CSV summary
    pub const REPORT_ORDER: [Subject; 2] = [Subject::Mathematics, Subject::Language];

    pub fn name(self) -> &'static str {
        match self {
            Subject::Language => "Language",
            Subject::Mathematics => "Mathematics",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Letter grade with its modifier stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseGrade {
    A,
    B,
    C,
    D,
    R,
    I,
}

impl BaseGrade {
    /// Column order of the CSV summary
    pub const ALL: [BaseGrade; 6] = [
        BaseGrade::A,
        BaseGrade::B,
        BaseGrade::C,
        BaseGrade::D,
        BaseGrade::R,
        BaseGrade::I,
    ];

    /// Map a character onto a recognized grade, `None` for anything else
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(BaseGrade::A),
            'B' => Some(BaseGrade::B),
            'C' => Some(BaseGrade::C),
            'D' => Some(BaseGrade::D),
            'R' => Some(BaseGrade::R),
            'I' => Some(BaseGrade::I),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            BaseGrade::A => 'A',
            BaseGrade::B => 'B',
            BaseGrade::C => 'C',
            BaseGrade::D => 'D',
            BaseGrade::R => 'R',
            BaseGrade::I => 'I',
        }
    }
}

impl fmt::Display for BaseGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A grade exactly as captured from page text, e.g. `B+`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeToken(String);

impl GradeToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character of the token
    pub fn base_char(&self) -> Option<char> {
        self.0.chars().next()
    }

    /// Recognized base grade, `None` if the first character is outside the alphabet
    pub fn base_grade(&self) -> Option<BaseGrade> {
        self.base_char().and_then(BaseGrade::from_char)
    }

    /// Trailing `+` or `-`, if present
    pub fn modifier(&self) -> Option<char> {
        self.0.chars().nth(1).filter(|c| matches!(c, '+' | '-'))
    }
}

impl fmt::Display for GradeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One grade found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Subject the grade belongs to
    pub subject: Subject,

    /// The captured grade
    pub grade: GradeToken,

    /// Zero-based index of the line holding the grade
    pub line: usize,
}

/// Ordered grades per subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubjectGrades {
    grades: BTreeMap<Subject, Vec<GradeToken>>,
}

impl SubjectGrades {
    /// Create an empty collection with both subjects present
    pub fn new() -> Self {
        Self {
            grades: Subject::ALL.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, subject: Subject, grade: GradeToken) {
        self.grades.entry(subject).or_default().push(grade);
    }

    /// Grades recorded for a subject, in the order they were found
    pub fn get(&self, subject: Subject) -> &[GradeToken] {
        self.grades.get(&subject).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append every grade of `other` after the grades already held
    pub fn extend(&mut self, other: SubjectGrades) {
        for (subject, grades) in other.grades {
            self.grades.entry(subject).or_default().extend(grades);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subject, &[GradeToken])> {
        self.grades.iter().map(|(s, g)| (*s, g.as_slice()))
    }

    /// Total number of grades over both subjects
    pub fn len(&self) -> usize {
        self.grades.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SubjectGrades {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Observation> for SubjectGrades {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        let mut grades = SubjectGrades::new();
        for observation in iter {
            grades.push(observation.subject, observation.grade);
        }
        grades
    }
}

/// Count of base grades per subject, every cell present from the start
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GradeCountTable {
    counts: BTreeMap<Subject, BTreeMap<BaseGrade, usize>>,
}

impl GradeCountTable {
    /// Create a table with all subjects and grades at zero
    pub fn new() -> Self {
        let counts: BTreeMap<Subject, BTreeMap<BaseGrade, usize>> = Subject::ALL
            .iter()
            .map(|subject| (*subject, BaseGrade::ALL.iter().map(|g| (*g, 0)).collect()))
            .collect();
        Self { counts }
    }

    pub fn increment(&mut self, subject: Subject, grade: BaseGrade) {
        *self
            .counts
            .entry(subject)
            .or_default()
            .entry(grade)
            .or_insert(0) += 1;
    }

    pub fn count(&self, subject: Subject, grade: BaseGrade) -> usize {
        self.counts
            .get(&subject)
            .and_then(|row| row.get(&grade))
            .copied()
            .unwrap_or(0)
    }

    /// Counts for a subject in `BaseGrade::ALL` order
    pub fn row(&self, subject: Subject) -> [usize; 6] {
        BaseGrade::ALL.map(|grade| self.count(subject, grade))
    }

    /// Sum of all counts for a subject
    pub fn subject_total(&self, subject: Subject) -> usize {
        self.row(subject).iter().sum()
    }

    pub fn subjects(&self) -> impl Iterator<Item = Subject> + '_ {
        self.counts.keys().copied()
    }
}

impl Default for GradeCountTable {
    fn default() -> Self {
        Self::new()
    }
}

/// How grades from several documents are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Each document replaces the grades of the previous one; only the
    /// last scanned document is counted
    #[default]
    LastDocument,

    /// Grades of every document are concatenated in scan order
    Accumulate,
}

/// Configuration options for grade scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Directory holding the report-card PDFs
    pub input_dir: PathBuf,

    /// Destination of the CSV summary
    pub output_file: PathBuf,

    /// How grades from several documents are combined
    pub policy: AggregationPolicy,

    /// Maximum number of files to process
    pub max_files: Option<usize>,

    /// Regex for Language grade lines, first capture group is the grade
    pub language_pattern: String,

    /// Regex for the grade line closing a Mathematics window
    pub mathematics_pattern: String,

    /// Optional JSON dump of the raw grades and counts
    pub json_report: Option<PathBuf>,

    /// Whether to display a progress bar while scanning
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            policy: AggregationPolicy::default(),
            max_files: None,
            language_pattern: DEFAULT_LANGUAGE_PATTERN.to_string(),
            mathematics_pattern: DEFAULT_MATHEMATICS_PATTERN.to_string(),
            json_report: None,
            show_progress: true,
        }
    }
}

impl ScanOptions {
    /// Load options from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading scan options from {}", path.display());

        let content = file_utils::read_file_to_string(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Grades and statistics for a single document
#[derive(Debug, Clone)]
pub struct DocumentGrades {
    /// Path of the scanned PDF
    pub path: PathBuf,

    /// Grades found in the document
    pub grades: SubjectGrades,

    /// Page-level statistics for the document
    pub stats: ScanStats,
}

/// Result of scanning an input directory
#[derive(Debug, Clone)]
pub struct GradeScanResult {
    /// Documents scanned, in scan order
    pub documents: Vec<PathBuf>,

    /// Grades retained under the configured policy
    pub grades: SubjectGrades,

    /// Statistics over the whole scan
    pub stats: ScanStats,
}

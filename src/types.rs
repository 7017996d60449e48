use serde::Serialize;
use std::path::PathBuf;

/// A closed list - one output file's worth of item lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Output name, e.g. "colors_warm"
    name: String,

    /// Item lines in source order
    lines: Vec<String>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Artifact {
            name: name.into(),
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Result of writing a single artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// A new file was created and populated
    Written { lines: usize },

    /// A file with that name already existed and was left untouched
    Skipped,

    /// The file could not be created or written
    Failed { reason: String },
}

/// Outcome of one dispatched artifact, keyed by its target path
#[derive(Debug, Clone, Serialize)]
pub struct WriteRecord {
    pub name: String,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Everything that happened during one conversion, in dispatch order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitReport {
    pub records: Vec<WriteRecord>,
}

impl SplitReport {
    pub fn artifacts(&self) -> usize {
        self.records.len()
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, WriteOutcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, WriteOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, WriteOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&WriteOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Configuration for the split process
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Separator placed between header names in an output name
    pub separator: String,

    /// Suffix appended to every output name
    pub extension: String,

    /// Number of spaces making up one nesting level
    pub indent_width: usize,

    /// Size of the write pool (None = one worker per CPU)
    pub workers: Option<usize>,
}

impl SplitConfig {
    /// The indentation unit used to measure header depth
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width.max(1))
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            separator: String::from("_"),
            extension: String::from(".txt"),
            indent_width: 4,
            workers: None,
        }
    }
}

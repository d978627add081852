use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    /// Overfull/underfull box reports.
    Typesetting,
}

impl Level {
    /// Lower-case name, as used in the JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Typesetting => "typesetting",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error, warning or typesetting issue recovered from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub level: Level,
    /// Source line number, when the log reports one.
    pub line: Option<u32>,
    /// File that was open in the engine when the entry was emitted.
    pub file: Option<String>,
    pub message: String,
    /// Context lines following an error. Always empty for other levels.
    pub content: String,
    /// Exact log text the entry was built from. Used as the de-duplication key.
    pub raw: String,
}

impl DiagnosticEntry {
    pub(crate) fn error(
        message: String,
        line: Option<u32>,
        file: Option<String>,
        raw: String,
    ) -> Self {
        Self {
            level: Level::Error,
            line,
            file,
            message,
            content: String::new(),
            raw,
        }
    }

    /// Warning or typesetting entry whose `raw` text is its message.
    pub(crate) fn single_line(
        level: Level,
        message: String,
        line: Option<u32>,
        file: Option<String>,
    ) -> Self {
        Self {
            level,
            line,
            file,
            raw: message.clone(),
            message,
            content: String::new(),
        }
    }
}

/// A file opened by the engine, with the files it opened in turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub files: Vec<FileNode>,
}

impl FileNode {
    /// Creates a node with no children.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
        }
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &FileNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.files.iter().rev());
            Some(node)
        })
    }
}

/// Output of a single parse: the three level buckets, the combined list and
/// the file inclusion tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub errors: Vec<DiagnosticEntry>,
    pub warnings: Vec<DiagnosticEntry>,
    pub typesetting: Vec<DiagnosticEntry>,
    /// Every entry in encounter order.
    pub all: Vec<DiagnosticEntry>,
    /// Files opened directly from the top level of the run.
    pub files: Vec<FileNode>,
}

impl ParseResult {
    /// The bucket holding entries of `level`.
    pub fn entries(&self, level: Level) -> &[DiagnosticEntry] {
        match level {
            Level::Error => &self.errors,
            Level::Warning => &self.warnings,
            Level::Typesetting => &self.typesetting,
        }
    }

    /// Returns `true` if at least one error was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if the log produced no entries at all.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Every file in the inclusion tree, depth first.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .flat_map(FileNode::walk)
            .map(|node| node.path.as_str())
    }
}

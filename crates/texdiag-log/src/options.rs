use crate::error::OptionsError;
use crate::ir::{DiagnosticEntry, ParseResult};
use regex::RegexSet;
use serde::{Deserialize, Serialize};

/// Patterns matching paths of files that belong to the TeX installation or
/// the compile sandbox rather than to the user's project.
pub const DEFAULT_FILE_BASE_NAMES: &[&str] = &["compiles", "/usr/local"];

/// Options accepted by [`LogParser`](crate::LogParser).
///
/// Field names follow the camel-case spelling used by JSON consumers, so a
/// config file such as `{"ignoreDuplicates": true}` deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Drop every entry whose `raw` text was already seen.
    pub ignore_duplicates: bool,
    /// Regular expressions for "not a project file" paths.
    ///
    /// The parser only carries these through; see [`BaseNameMatcher`].
    pub file_base_names: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_duplicates: false,
            file_base_names: DEFAULT_FILE_BASE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ParseOptions {
    /// Sets whether entries with an already reported `raw` text are dropped.
    pub fn ignoring_duplicates(mut self, ignore: bool) -> Self {
        self.ignore_duplicates = ignore;
        self
    }

    /// Replaces the base-name patterns.
    pub fn with_file_base_names<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_base_names = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Compiles [`file_base_names`](Self::file_base_names) into a matcher.
    pub fn compile_base_names(&self) -> Result<BaseNameMatcher, OptionsError> {
        for pattern in &self.file_base_names {
            if let Err(source) = regex::Regex::new(pattern) {
                return Err(OptionsError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                });
            }
        }
        // Every pattern compiled on its own, so the set cannot fail either.
        let set = RegexSet::new(&self.file_base_names).map_err(|source| {
            OptionsError::InvalidPattern {
                pattern: self.file_base_names.join("|"),
                source,
            }
        })?;
        Ok(BaseNameMatcher { set })
    }
}

/// Compiled form of [`ParseOptions::file_base_names`].
#[derive(Debug, Clone)]
pub struct BaseNameMatcher {
    set: RegexSet,
}

impl BaseNameMatcher {
    /// Returns `true` when `path` matches any base-name pattern.
    pub fn is_base_file(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    /// Entries without a file are kept; they cannot be attributed elsewhere.
    pub fn is_project_entry(&self, entry: &DiagnosticEntry) -> bool {
        entry
            .file
            .as_deref()
            .is_none_or(|file| !self.is_base_file(file))
    }

    /// Removes entries attributed to base files from every bucket.
    pub fn project_only(&self, result: &ParseResult) -> ParseResult {
        let keep = |entries: &[DiagnosticEntry]| -> Vec<DiagnosticEntry> {
            entries
                .iter()
                .filter(|entry| self.is_project_entry(entry))
                .cloned()
                .collect()
        };
        ParseResult {
            errors: keep(&result.errors),
            warnings: keep(&result.warnings),
            typesetting: keep(&result.typesetting),
            all: keep(&result.all),
            files: result.files.clone(),
        }
    }
}

//! Plain-text rendering for the `summary` command.

use texdiag_log::{DiagnosticEntry, ParseResult};

/// One `file:line: level: message` line per entry, then the totals.
pub fn render_summary(result: &ParseResult) -> String {
    let totals = format!(
        "{}, {}, {}",
        count(result.errors.len(), "error"),
        count(result.warnings.len(), "warning"),
        count(result.typesetting.len(), "typesetting issue"),
    );
    result
        .all
        .iter()
        .map(format_entry)
        .chain(std::iter::once(totals))
        .map(|line| line + "\n")
        .collect()
}

fn format_entry(entry: &DiagnosticEntry) -> String {
    let location = match (&entry.file, entry.line) {
        (Some(file), Some(line)) => format!("{file}:{line}: "),
        (Some(file), None) => format!("{file}: "),
        (None, Some(line)) => format!("line {line}: "),
        (None, None) => String::new(),
    };
    format!("{location}{}: {}", entry.level, entry.message)
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

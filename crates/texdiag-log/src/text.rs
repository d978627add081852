//! Line normalization and the line cursor used by the parser.

use crate::patterns::WHITESPACE_LINE;
use regex::Regex;

/// Column at which TeX engines hard-wrap their terminal and log output.
pub const LOG_WRAP_LIMIT: usize = 79;

/// Log text split into logical lines, with a cursor.
///
/// Construction normalizes line endings (`\r\n` and lone `\r` become `\n`)
/// and undoes TeX's fixed-width wrapping: a physical line of exactly
/// [`LOG_WRAP_LIMIT`] characters that does not end in `...` is joined with
/// the following line, unless that line is empty or starts with `!`.
#[derive(Debug, Clone)]
pub struct LogText {
    lines: Vec<String>,
    /// Index of the line the next call to [`next_line`](Self::next_line) returns.
    row: usize,
}

impl LogText {
    /// Normalizes `text` and splits it into logical lines.
    pub fn new(text: &str) -> Self {
        Self {
            lines: unwrap_lines(&normalize_line_endings(text)),
            row: 0,
        }
    }

    /// All logical lines, independent of the cursor position.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Advances the cursor. Returns `None` once the text is exhausted.
    pub fn next_line(&mut self) -> Option<String> {
        let line = self.lines.get(self.row)?.clone();
        self.row += 1;
        Some(line)
    }

    /// Steps back over the line last returned by [`next_line`](Self::next_line).
    pub fn rewind_line(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    /// Consumes lines up to and including the next whitespace-only line.
    pub fn lines_up_to_next_whitespace_line(&mut self, stop_at_error: bool) -> Vec<String> {
        self.lines_up_to_next_matching_line(&WHITESPACE_LINE, stop_at_error)
    }

    /// Consumes lines up to and including the next line matching `pattern`,
    /// or to the end of the text.
    ///
    /// With `stop_at_error`, a line starting with `"! "` ends the run without
    /// being consumed, so the caller sees it again as a new error.
    pub fn lines_up_to_next_matching_line(
        &mut self,
        pattern: &Regex,
        stop_at_error: bool,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line() {
            if stop_at_error && line.starts_with("! ") {
                self.rewind_line();
                break;
            }
            let done = pattern.is_match(&line);
            lines.push(line);
            if done {
                break;
            }
        }
        lines
    }
}

/// Runs line-ending normalization and unwrapping, returning the logical
/// lines joined with `\n`. Applying it to its own output changes nothing.
pub fn normalize(text: &str) -> String {
    LogText::new(text).lines.join("\n")
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn unwrap_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut previous: Option<&str> = None;

    for current in text.split('\n') {
        if previous.is_some_and(is_wrapped)
            && continues_wrap(current)
            && let Some(last) = lines.last_mut()
        {
            last.push_str(current);
        } else {
            lines.push(current.to_string());
        }
        previous = Some(current);
    }
    lines
}

/// Whether a physical line was cut by the engine's line-length limit.
fn is_wrapped(line: &str) -> bool {
    line.chars().count() == LOG_WRAP_LIMIT && !line.ends_with("...")
}

fn continues_wrap(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('!')
}

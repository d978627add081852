use crate::ir::{DiagnosticEntry, FileNode, Level, ParseResult};
use crate::options::ParseOptions;
use crate::patterns::{
    self, FILE_EXTENSION_END, FILE_LINE_ERROR, FILE_PATH_START, HBOX_WARNING, LATEX_WARNING,
    LINE_REF_START, PACKAGE_NAME, PACKAGE_WARNING, PATH_BREAK_AFTER_SPACE,
};
use crate::text::LogText;
use std::collections::HashSet;

/// Banner printed by some engines after a fatal error. It starts with `!`
/// but carries no information of its own.
const FATAL_ERROR_BANNER: &str = "!  ==> Fatal error occurred, no output PDF file produced!";

/// Parser state between lines.
///
/// An error being captured travels inside the state, so the context capture
/// can never run without the entry it belongs to.
#[derive(Debug)]
enum State {
    Normal,
    ErrorCapture(DiagnosticEntry),
}

/// One open file on the inclusion stack. The bottom frame stands for the top
/// level of the run and has no path.
#[derive(Debug, Default)]
struct Frame {
    path: Option<String>,
    files: Vec<FileNode>,
}

/// A parser for one LaTeX log.
///
/// `LogParser` walks the logical lines of a log once, classifying errors,
/// warnings and box reports, and tracks which file the engine had open by
/// matching `(path` and `)` tokens. Each parser owns all of its state; use a
/// new instance per log.
///
/// ```
/// use texdiag_log::{LogParser, ParseOptions};
///
/// let log = "(./main.tex\nLaTeX Warning: Citation `knuth' undefined on input line 3.\n)";
/// let result = LogParser::new(log, ParseOptions::default()).parse();
///
/// assert_eq!(result.warnings.len(), 1);
/// assert_eq!(result.warnings[0].line, Some(3));
/// assert_eq!(result.warnings[0].file.as_deref(), Some("./main.tex"));
/// ```
#[derive(Debug)]
pub struct LogParser {
    log: LogText,
    options: ParseOptions,
    data: Vec<DiagnosticEntry>,
    file_stack: Vec<Frame>,
    /// `(` seen without a recognizable path, still waiting for their `)`.
    open_parens: usize,
}

impl LogParser {
    /// Creates a parser over `text`.
    ///
    /// Line endings are normalized and wrapped lines rejoined up front; no
    /// classification happens until [`parse`](Self::parse) is called.
    pub fn new(text: &str, options: ParseOptions) -> Self {
        Self {
            log: LogText::new(text),
            options,
            data: Vec::new(),
            file_stack: vec![Frame::default()],
            open_parens: 0,
        }
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Runs the parser over the whole log.
    pub fn parse(mut self) -> ParseResult {
        while let Some(line) = self.log.next_line() {
            if let State::ErrorCapture(entry) = self.parse_line(&line) {
                self.capture_error_context(entry);
            }
        }
        log::debug!(
            "parsed {} log lines into {} entries",
            self.log.lines().len(),
            self.data.len()
        );
        self.post_process()
    }

    /// Classifies one line in the normal state. Rules are tried in a fixed
    /// order because several patterns can match the same line.
    fn parse_line(&mut self, line: &str) -> State {
        if line.starts_with('!') && line != FATAL_ERROR_BANNER {
            let message = line.chars().skip(2).collect();
            let raw = format!("{line}\n");
            return State::ErrorCapture(DiagnosticEntry::error(
                message,
                None,
                self.current_file(),
                raw,
            ));
        }
        if let Some(caps) = FILE_LINE_ERROR.captures(line) {
            let raw = format!("{line}\n");
            return State::ErrorCapture(DiagnosticEntry::error(
                caps[3].to_string(),
                caps[2].parse().ok(),
                Some(caps[1].to_string()),
                raw,
            ));
        }
        if line.starts_with("Runaway argument") {
            self.parse_runaway_argument(line);
        } else if let Some(caps) = LATEX_WARNING.captures(line) {
            let message = caps[1].to_string();
            let line_no = patterns::lines_number(&message);
            self.push(DiagnosticEntry::single_line(
                Level::Warning,
                message,
                line_no,
                self.current_file(),
            ));
        } else if HBOX_WARNING.is_match(line) {
            self.push(DiagnosticEntry::single_line(
                Level::Typesetting,
                line.to_string(),
                patterns::lines_number(line),
                self.current_file(),
            ));
        } else if PACKAGE_WARNING.is_match(line) {
            self.parse_package_warning(line);
        } else {
            self.parse_parens_for_filenames(line);
        }
        State::Normal
    }

    /// Appends the three context blocks that follow a TeX error: everything
    /// up to the `l.N` line, then two blank-line terminated blocks.
    fn capture_error_context(&mut self, mut entry: DiagnosticEntry) {
        let mut content = self
            .log
            .lines_up_to_next_matching_line(&LINE_REF_START, false)
            .join("\n");
        content.push('\n');
        content.push_str(&self.log.lines_up_to_next_whitespace_line(true).join("\n"));
        content.push('\n');
        content.push_str(&self.log.lines_up_to_next_whitespace_line(true).join("\n"));

        entry.raw.push_str(&content);
        entry.content = content;
        if entry.line.is_none() {
            entry.line = patterns::line_ref_number(&entry.raw);
        }
        self.push(entry);
    }

    fn parse_runaway_argument(&mut self, line: &str) {
        let mut content = self.log.lines_up_to_next_whitespace_line(false).join("\n");
        content.push('\n');
        content.push_str(&self.log.lines_up_to_next_whitespace_line(false).join("\n"));

        let mut entry = DiagnosticEntry::error(
            line.to_string(),
            None,
            self.current_file(),
            format!("{line}\n{content}"),
        );
        entry.line = patterns::line_ref_number(&entry.raw);
        entry.content = content;
        self.push(entry);
    }

    /// Package, class and module warnings continue on following lines, each
    /// prefixed with `(<name>)`. The capture runs until the first empty line
    /// or the end of the log; it does not stop at a following warning.
    fn parse_package_warning(&mut self, line: &str) {
        let Some(name) = PACKAGE_NAME.captures(line).map(|caps| caps[1].to_string()) else {
            return;
        };
        let continuation = match patterns::package_continuation(&name) {
            Ok(re) => re,
            Err(err) => {
                log::warn!("cannot build continuation pattern for `{name}`: {err}");
                return;
            }
        };

        let mut fragments = vec![line.to_string()];
        let mut line_no = patterns::lines_number(line);
        while let Some(next) = self.log.next_line() {
            if next.is_empty() {
                break;
            }
            line_no = patterns::lines_number(&next).or(line_no);
            if let Some(caps) = continuation.captures(&next) {
                fragments.push(caps[1].to_string());
            }
        }

        let message = fragments.join(" ");
        self.push(DiagnosticEntry::single_line(
            Level::Warning,
            message,
            line_no,
            self.current_file(),
        ));
    }

    /// Walks every `(` and `)` on the line, opening and closing file frames.
    fn parse_parens_for_filenames(&mut self, line: &str) {
        let mut rest = line;
        while let Some(pos) = rest.find(['(', ')']) {
            let token = rest.as_bytes()[pos];
            rest = &rest[pos + 1..];
            if token == b'(' {
                match consume_file_path(rest) {
                    Some((path, remaining)) => {
                        self.open_file(path);
                        rest = remaining;
                    }
                    None => self.open_parens += 1,
                }
            } else if self.open_parens > 0 {
                self.open_parens -= 1;
            } else {
                self.close_file();
            }
        }
    }

    fn open_file(&mut self, path: &str) {
        log::trace!("enter {path} (depth {})", self.file_stack.len());
        self.file_stack.push(Frame {
            path: Some(path.to_string()),
            files: Vec::new(),
        });
    }

    /// Pops the current file. The outermost file stays open for the rest of
    /// the run, so a stray `)` cannot detach later entries from it.
    fn close_file(&mut self) {
        if self.file_stack.len() <= 2 {
            log::trace!("`)` without a closable file");
            return;
        }
        if let Some(frame) = self.file_stack.pop() {
            log::trace!("exit {:?}", frame.path);
            self.attach(frame);
        }
    }

    /// Hands a finished frame to its parent. Children are attached in the
    /// order they were opened, since a sibling can only open after the
    /// previous one closed.
    fn attach(&mut self, frame: Frame) {
        let Some(path) = frame.path else {
            return;
        };
        if let Some(parent) = self.file_stack.last_mut() {
            parent.files.push(FileNode {
                path,
                files: frame.files,
            });
        }
    }

    fn current_file(&self) -> Option<String> {
        self.file_stack.last().and_then(|frame| frame.path.clone())
    }

    fn push(&mut self, entry: DiagnosticEntry) {
        log::trace!("{} at {:?}:{:?}", entry.level, entry.file, entry.line);
        self.data.push(entry);
    }

    fn post_process(mut self) -> ParseResult {
        // Files still open at the end of the log belong in the tree too.
        while self.file_stack.len() > 1 {
            if let Some(frame) = self.file_stack.pop() {
                self.attach(frame);
            }
        }
        let files = self
            .file_stack
            .pop()
            .map(|root| root.files)
            .unwrap_or_default();

        let mut result = ParseResult {
            files,
            ..ParseResult::default()
        };
        let mut seen = HashSet::new();
        for entry in self.data {
            if self.options.ignore_duplicates && !seen.insert(entry.raw.clone()) {
                continue;
            }
            match entry.level {
                Level::Error => result.errors.push(entry.clone()),
                Level::Warning => result.warnings.push(entry.clone()),
                Level::Typesetting => result.typesetting.push(entry.clone()),
            }
            result.all.push(entry);
        }
        result
    }
}

/// Parses `text` with `options`. Shorthand for
/// `LogParser::new(text, options.clone()).parse()`.
pub fn parse_latex_log(text: &str, options: &ParseOptions) -> ParseResult {
    LogParser::new(text, options.clone()).parse()
}

/// Reads a file path from the text following a `(`.
///
/// Returns the path and the text after it (starting at the terminator), or
/// `None` when the text does not look like a path. A path needs at least one
/// `/`. It ends at a space, paren or backslash, except that a space is kept
/// when the text before it has no file extension and the text after it does
/// not open with a quote, paren or bracket.
fn consume_file_path(text: &str) -> Option<(&str, &str)> {
    if !FILE_PATH_START.is_match(text) {
        return None;
    }

    let mut end = text.find([' ', '(', ')', '\\']);
    while let Some(pos) = end {
        if text.as_bytes()[pos] != b' ' || FILE_EXTENSION_END.is_match(&text[..pos]) {
            break;
        }
        let remaining = &text[pos + 1..];
        if PATH_BREAK_AFTER_SPACE.is_match(remaining) {
            break;
        }
        end = remaining
            .find([' ', '"', '(', ')', '[', ']'])
            .map(|next| pos + 1 + next);
    }

    Some(match end {
        Some(pos) => text.split_at(pos),
        None => (text, ""),
    })
}

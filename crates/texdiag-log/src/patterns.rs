//! Line classification patterns.
//!
//! Character classes are spelled out in ASCII: TeX logs are byte streams and
//! the engine's own notion of digits and word characters is ASCII.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("built-in log pattern `{pattern}` failed to compile: {err}"),
    }
}

pub(crate) static LATEX_WARNING: Lazy<Regex> =
    Lazy::new(|| compile(r"^LaTeX(?:3| Font)? Warning: (.*)$"));

pub(crate) static HBOX_WARNING: Lazy<Regex> = Lazy::new(|| compile(r"^(Over|Under)full \\(v|h)box"));

pub(crate) static PACKAGE_WARNING: Lazy<Regex> =
    Lazy::new(|| compile(r"^((?:Package|Class|Module) \b.+\b Warning:.*)$"));

pub(crate) static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:Package|Class|Module) (\b.+\b) Warning"));

pub(crate) static LINES: Lazy<Regex> = Lazy::new(|| compile(r"lines? ([0-9]+)"));

/// `path:line: message`, as printed with `-file-line-error`.
pub(crate) static FILE_LINE_ERROR: Lazy<Regex> = Lazy::new(|| compile(r"^([./].*):([0-9]+): (.*)"));

pub(crate) static LINE_REF_START: Lazy<Regex> = Lazy::new(|| compile(r"^l\.[0-9]+"));

pub(crate) static LINE_REF: Lazy<Regex> = Lazy::new(|| compile(r"l\.([0-9]+)"));

pub(crate) static WHITESPACE_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^ *$"));

/// A file path must contain at least one directory separator.
pub(crate) static FILE_PATH_START: Lazy<Regex> = Lazy::new(|| compile(r"^/?([^ ()\\]+/)+"));

pub(crate) static FILE_EXTENSION_END: Lazy<Regex> = Lazy::new(|| compile(r"\.[0-9A-Za-z_]+$"));

pub(crate) static PATH_BREAK_AFTER_SPACE: Lazy<Regex> = Lazy::new(|| compile(r#"^\s*["()\[\]]"#));

/// Builds the continuation filter for a multi-line package warning, which
/// strips any number of leading `(<package>)` markers.
pub(crate) fn package_continuation(package: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(?:\({}\))*\s*(.*)", regex::escape(package)))
}

/// First `line N` / `lines N` number in `text`.
pub(crate) fn lines_number(text: &str) -> Option<u32> {
    first_number(&LINES, text)
}

/// First `l.N` number in `text`.
pub(crate) fn line_ref_number(text: &str) -> Option<u32> {
    first_number(&LINE_REF, text)
}

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

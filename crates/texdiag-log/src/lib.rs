//! # texdiag Log Parser
//!
//! Classifies the output of a LaTeX compilation (`*.log` or captured stdout)
//! into errors, warnings and typesetting issues, and reconstructs which files
//! the engine read.
//!
//! ## Overview
//!
//! TeX engines print everything to one unstructured stream. This crate
//! handles:
//!
//! - **Line wrapping**: engines hard-wrap at 79 characters; wrapped lines are
//!   rejoined before anything is matched
//! - **File tracking**: `(./chapter.tex` opens a file and the matching `)`
//!   closes it, so each diagnostic is attributed to the file that was open
//! - **Errors**: `! ...` lines and `file:line: ...` lines, with the context
//!   blocks TeX prints after them
//! - **Warnings**: `LaTeX Warning:`, multi-line `Package ... Warning:`
//! - **Typesetting**: overfull and underfull boxes
//!
//! ## Architecture
//!
//! ```text
//! raw text ──► LogText ──► LogParser ──► ParseResult
//!             (normalize,   (classify,    errors / warnings /
//!              unwrap,       track files,  typesetting / all /
//!              cursor)       dedup)        files
//! ```
//!
//! Parsing is infallible: unrecognized lines are skipped and truncated logs
//! yield whatever was captured.
//!
//! ## Examples
//!
//! ```
//! use texdiag_log::{Level, ParseOptions, parse_latex_log};
//!
//! let log = "\
//! (./main.tex
//! ! Undefined control sequence.
//! l.10 \\foo
//!
//! )";
//! let result = parse_latex_log(log, &ParseOptions::default());
//!
//! assert_eq!(result.errors.len(), 1);
//! let error = &result.errors[0];
//! assert_eq!(error.level, Level::Error);
//! assert_eq!(error.line, Some(10));
//! assert_eq!(error.file.as_deref(), Some("./main.tex"));
//! ```
//!
//! ### Exporting to JSON
//!
//! ```no_run
//! use texdiag_log::{ParseOptions, parse_latex_log};
//! use std::fs;
//!
//! let log = fs::read_to_string("main.log")?;
//! let result = parse_latex_log(&log, &ParseOptions::default().ignoring_duplicates(true));
//! fs::write("diagnostics.json", serde_json::to_string_pretty(&result)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Configuration errors.
pub mod error;
/// Diagnostic entries, the file tree and the parse result.
pub mod ir;
/// Parser options and base-file filtering.
pub mod options;
/// The log parser state machine.
pub mod parser;
mod patterns;
/// Line normalization and cursor.
pub mod text;


pub use error::OptionsError;
pub use ir::{DiagnosticEntry, FileNode, Level, ParseResult};
pub use options::{BaseNameMatcher, ParseOptions};
pub use parser::{LogParser, parse_latex_log};

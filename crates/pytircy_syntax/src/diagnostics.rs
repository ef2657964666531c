//! Diagnostics and error reporting for the Pytircy front-end
//!
//! Lexer and parser errors carry a byte [`Span`] into the source. [`format_error`] renders one with the offending
//! line and a label through `miette`'s graphical handler.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Error,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            ..Self::new(message, span)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// `miette` view of a [`CompileError`] bound to its source file.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(code(pytircy::syntax))]
struct SourceReport {
    kind: ErrorKind,
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
}

impl SourceReport {
    fn new(file_name: &str, source: &str, error: &CompileError) -> Self {
        let start = error.span.start.min(source.len());
        let end = error.span.end.clamp(start, source.len());

        let mut help_lines: Vec<String> = error.notes.iter().map(|n| format!("note: {n}")).collect();
        help_lines.extend(error.hints.iter().cloned());
        let help = if help_lines.is_empty() {
            None
        } else {
            Some(help_lines.join("\n"))
        };

        Self {
            kind: error.kind,
            message: error.message.clone(),
            src: NamedSource::new(file_name, source.to_string()),
            span: (start, end - start).into(),
            help,
        }
    }
}

/// Render an error with source context as plain text (no ANSI colours).
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let report = SourceReport::new(file_name, source, error);
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, &report).is_err() {
        // Fall back to the one-line form if the source span could not be rendered.
        out = format!("{}: {}: {}", file_name, error.kind, error.message);
    }
    out
}

/// Render a batch of errors, one block per error.
pub fn format_errors(file_name: &str, source: &str, errors: &[CompileError]) -> String {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&format_error(file_name, source, err));
        msg.push('\n');
    }
    msg.trim_end().to_string()
}

/// Get line number, column number, and line text for a byte offset
pub fn line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    (line_num, offset - line_start + 1, &source[line_start..line_end])
}

//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::path::{Path, PathBuf};
use thiserror::Error;
use super::Span;

/// Failure while reading, decoding, encoding or writing a cartridge image
#[derive(Error, Debug)]
pub enum RomError {
    #[error(
        "image has unexpected size {actual:#010x} (expected {expected:#010x}); \
         is it decompressed?"
    )]
    InvalidImageSize { expected: usize, actual: usize },

    #[error("[{index:04x}]: address {offset:08x} not 32-bit aligned")]
    MalformedOffset { index: usize, offset: u32 },

    #[error("line {line}: malformed control code `{text}`")]
    MalformedEscape { line: usize, text: String, span: Span },

    #[error("line {line}: expected a `[xxxx]:` message prefix")]
    MalformedLine { line: usize, span: Span },

    #[error("line {line}: message index {found:04x} does not match its position {expected:04x}")]
    IndexMismatch {
        line: usize,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("line {line}: text holds more than the {capacity} messages the table can address")]
    TooManyEntries { line: usize, capacity: usize, span: Span },

    #[error(
        "text data is {size:#x} bytes, {overflow:#x} over the {capacity:#x} byte limit; \
         erase unused sentences or simplify the text so the data fits"
    )]
    CapacityExceeded {
        size: usize,
        capacity: usize,
        overflow: usize,
    },

    #[error("{len:#x} bytes at {offset:#010x} lie outside the {size:#x} byte image")]
    OutOfBounds { offset: usize, len: usize, size: usize },

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RomError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn malformed_escape(line: usize, text: impl Into<String>, span: Span) -> Self {
        Self::MalformedEscape {
            line,
            text: text.into(),
            span,
        }
    }

    pub fn capacity_exceeded(size: usize, capacity: usize) -> Self {
        Self::CapacityExceeded {
            size,
            capacity,
            overflow: size.saturating_sub(capacity),
        }
    }

    pub fn out_of_bounds(offset: usize, len: usize, size: usize) -> Self {
        Self::OutOfBounds { offset, len, size }
    }

    /// Location in the script file this error points at, if it came from one
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::MalformedEscape { span, .. }
            | Self::MalformedLine { span, .. }
            | Self::IndexMismatch { span, .. }
            | Self::TooManyEntries { span, .. } => Some(*span),
            _ => None,
        }
    }
}

pub type RomResult<T> = Result<T, RomError>;

/// Diagnostic reporter for pretty error output against script files
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build the diagnostic for an error; errors without a span become a bare message
    pub fn diagnostic(&self, file_id: usize, error: &RomError) -> Diagnostic<usize> {
        let label = |span: &Span, message: &str| {
            vec![Label::primary(file_id, span.range()).with_message(message.to_string())]
        };

        match error {
            RomError::MalformedEscape { text, span, .. } => Diagnostic::error()
                .with_message("malformed control code")
                .with_labels(label(span, &format!("`{text}` is not a `\\xHH` escape")))
                .with_notes(vec!["control codes are written as a backslash, \
                                  `x` and two hex digits, e.g. `\\x02`"
                    .to_string()]),

            RomError::MalformedLine { span, .. } => Diagnostic::error()
                .with_message("malformed message line")
                .with_labels(label(span, "expected `[xxxx]: ` here")),

            RomError::IndexMismatch { expected, span, .. } => Diagnostic::error()
                .with_message("message out of order")
                .with_labels(label(span, &format!("this line is message {expected:04x}")))
                .with_notes(vec!["messages are assigned by line order; do not insert, \
                                  delete or reorder lines"
                    .to_string()]),

            RomError::TooManyEntries { capacity, span, .. } => Diagnostic::error()
                .with_message("too many messages")
                .with_labels(label(span, &format!("the text table ends after {capacity} messages"))),

            other => Diagnostic::error().with_message(other.to_string()),
        }
    }

    pub fn report_error(&self, file_id: usize, error: &RomError) {
        let diagnostic = self.diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

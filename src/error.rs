//! Positioned errors and their rendering.
//!
//! Every failure of [`evaluate`](crate::evaluate) is reported as an
//! [`EvalError`] carrying a message and the 0-based character offset it is
//! attributed to. When the source text is attached, the error renders a short
//! excerpt of it with a caret under the offending character:
//!
//! ```text
//! Division by zero at index 3
//! 1 / 0
//!   ^
//! ```

use std::fmt;

use crate::{evaluator::RuntimeError, lexer::LexError, parser::ParseError};

/// Characters of context shown on each side of the error offset.
const CONTEXT_WIDTH: usize = 15;

const ELLIPSIS: &str = "...";

/// Which stage rejected the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unterminated string, unknown symbol, malformed numeral
    Lex,
    /// Unexpected, missing or trailing token, invalid number literal
    Parse,
    /// Operator applied to operands it does not support
    Type,
    /// Division by zero
    Arithmetic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Lex => "lex error",
            ErrorKind::Parse => "parse error",
            ErrorKind::Type => "type error",
            ErrorKind::Arithmetic => "arithmetic error",
        })
    }
}

/// An error returned by [`evaluate`](crate::evaluate), with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    kind: ErrorKind,
    message: String,
    offset: usize,
    source_text: Option<String>,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, offset: usize) -> Self {
        EvalError {
            kind,
            message: message.into(),
            offset,
            source_text: None,
        }
    }

    /// Attaches the expression text the offset refers to, enabling the snippet.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_text = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 0-based character offset into the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    /// The excerpt and caret lines, when a source is attached.
    pub fn snippet(&self) -> Option<String> {
        self.source_text
            .as_deref()
            .map(|source| render_snippet(self.offset, source))
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_error(
            &self.message,
            self.offset,
            self.source_text.as_deref(),
        ))
    }
}

impl std::error::Error for EvalError {}

impl From<LexError> for EvalError {
    fn from(e: LexError) -> Self {
        EvalError::new(ErrorKind::Lex, e.to_string(), e.offset())
    }
}

impl From<ParseError> for EvalError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Lex(lex) => lex.into(),
            other => EvalError::new(ErrorKind::Parse, other.to_string(), other.offset()),
        }
    }
}

impl From<RuntimeError> for EvalError {
    fn from(e: RuntimeError) -> Self {
        let kind = match e {
            RuntimeError::Type { .. } => ErrorKind::Type,
            RuntimeError::DivisionByZero { .. } => ErrorKind::Arithmetic,
        };
        EvalError::new(kind, e.to_string(), e.offset())
    }
}

/// Formats an error message with its position.
///
/// Without a source the result is `"<message> at index <offset + 1>"`. With a
/// source, two more lines follow: up to 15 characters of context on each side
/// of the offset (with `...` where the source was cut) and a caret under the
/// offset. Offsets past the end of the source point just after its last
/// character.
///
/// # Examples
///
/// ```
/// use miniexpr::error::format_error;
///
/// assert_eq!(format_error("Boom", 4, None), "Boom at index 5");
/// assert_eq!(
///     format_error("Expected ')' to close '('", 6, Some("(1 + 2")),
///     "Expected ')' to close '(' at index 7\n(1 + 2\n      ^"
/// );
/// ```
pub fn format_error(message: &str, offset: usize, source: Option<&str>) -> String {
    let base = format!("{} at index {}", message, offset + 1);
    match source {
        Some(source) => format!("{}\n{}", base, render_snippet(offset, source)),
        None => base,
    }
}

fn render_snippet(offset: usize, source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let p = offset.min(len);

    let start = p.saturating_sub(CONTEXT_WIDTH);
    let end = (p + CONTEXT_WIDTH).min(len);

    let mut excerpt = String::new();
    let mut caret_column = p - start;
    if start > 0 {
        excerpt.push_str(ELLIPSIS);
        caret_column += ELLIPSIS.len();
    }
    excerpt.extend(&chars[start..end]);
    if end < len {
        excerpt.push_str(ELLIPSIS);
    }

    format!("{}\n{}^", excerpt, " ".repeat(caret_column))
}

#[test]
fn test_snippet_is_clamped_to_source() {
    assert_eq!(format_error("Oops", 99, Some("ab")), "Oops at index 100\nab\n  ^");
    assert_eq!(format_error("Oops", 0, Some("")), "Oops at index 1\n\n^");
}

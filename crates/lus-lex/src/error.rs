//! Lexical error type.

use thiserror::Error;

use lus_util::{Diagnostic, SourceSnippet, Span, Stage};

/// A fatal lexical error.
///
/// The scanner stops at the first unrecognized construct; everything
/// after it is unreliable, so lexing returns `Result` rather than
/// accumulating (parse and semantic stages accumulate instead).
#[derive(Clone, Debug, Error, PartialEq)]
#[error("lexical error at line {line}, column {column}: {message}")]
pub struct LexError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Source line containing the error, for diagnostic context.
    pub context: Option<String>,
}

impl LexError {
    /// Creates an error at a source position.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::LexError;
    ///
    /// let err = LexError::new("unexpected character '@'", 2, 5);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "lexical error at line 2, column 5: unexpected character '@'"
    /// );
    /// ```
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Converts into a renderable diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::LexError;
    /// use lus_util::{Level, Stage};
    ///
    /// let err = LexError::new("unterminated string literal", 1, 9)
    ///     .with_context("var s = \"abc");
    /// let diag = err.to_diagnostic();
    /// assert_eq!(diag.stage, Stage::Lex);
    /// assert_eq!(diag.level, Level::Error);
    /// assert!(diag.snippet.is_some());
    /// ```
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(
            Stage::Lex,
            self.message.clone(),
            Span::point(self.line, self.column),
        );
        if let Some(context) = &self.context {
            diag = diag.with_snippet(SourceSnippet::new(context.clone(), self.column));
        }
        diag
    }
}

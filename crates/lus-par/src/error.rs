//! Syntax error type.

use thiserror::Error;

use lus_lex::{Token, TokenKind};
use lus_util::{Diagnostic, Stage};

/// A syntax error at a specific token.
///
/// Parse errors are accumulated: after reporting one, the parser
/// resynchronizes and keeps going, so a single run can surface several.
#[derive(Clone, Debug, Error)]
#[error("syntax error at line {}, column {}: {message}", found.span.line, found.span.column)]
pub struct ParseError {
    pub message: String,
    /// The token the parser was looking at when the rule failed.
    pub found: Token,
}

impl ParseError {
    pub fn new(message: impl Into<String>, found: Token) -> Self {
        Self {
            message: message.into(),
            found,
        }
    }

    /// Converts into a renderable diagnostic, naming the offending token.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::{LiteralValue, Token, TokenKind};
    /// use lus_par::ParseError;
    /// use lus_util::{Span, Stage};
    ///
    /// let found = Token::new(TokenKind::RBrace, "}", LiteralValue::None, Span::point(4, 2));
    /// let diag = ParseError::new("expected expression", found).to_diagnostic();
    ///
    /// assert_eq!(diag.stage, Stage::Parse);
    /// assert!(diag.message.contains("RBrace"));
    /// ```
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = if self.found.kind == TokenKind::Eof {
            format!("{} (found end of file)", self.message)
        } else {
            format!(
                "{} (found {} '{}')",
                self.message, self.found.kind, self.found.lexeme
            )
        };
        Diagnostic::error(Stage::Parse, message, self.found.span)
    }
}

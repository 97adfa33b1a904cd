//! Core scanner implementation.
//!
//! This module contains the main `Scanner` struct, the token dispatch
//! loop, and the shared push/error helpers the other scanner modules
//! build on.

use lus_util::Span;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{LiteralValue, Token, TokenKind};

/// Scanner for Lusitano source code.
///
/// Transforms a UTF-8 source string into a token vector terminated by a
/// single [`TokenKind::Eof`]. The scanner is fatal-on-first-error: any
/// unrecognized construct aborts with a [`LexError`] carrying the line,
/// column, and source-line context.
pub struct Scanner<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Tokens produced so far.
    pub(crate) tokens: Vec<Token>,

    /// Byte offset where the current token starts.
    pub(crate) token_start: usize,

    /// Line where the current token starts (1-based).
    pub(crate) token_start_line: u32,

    /// Column where the current token starts (1-based).
    pub(crate) token_start_column: u32,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner for the given source text.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::Scanner;
    ///
    /// let scanner = Scanner::new("var x = 1");
    /// let tokens = scanner.scan().unwrap();
    /// assert_eq!(tokens.len(), 5);
    /// ```
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Runs the full lexical analysis.
    ///
    /// # Returns
    ///
    /// The token sequence ending in exactly one `Eof` token, or the
    /// first [`LexError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::{Scanner, TokenKind};
    ///
    /// let tokens = Scanner::new("escreva(2 + 3)").scan().unwrap();
    /// assert_eq!(tokens[0].kind, TokenKind::Print);
    /// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    ///
    /// let err = Scanner::new("\"aberta").scan().unwrap_err();
    /// assert!(err.message.contains("unterminated string"));
    /// ```
    pub fn scan(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_whitespace_and_comments()?;
            if self.cursor.is_at_end() {
                break;
            }
            self.begin_token();
            self.scan_token()?;
        }

        let here = self.cursor.position();
        self.tokens.push(Token::eof(Span::new(
            here,
            here,
            self.cursor.line(),
            self.cursor.column(),
        )));
        Ok(self.tokens)
    }

    /// Scans exactly one token, dispatching on the current character.
    fn scan_token(&mut self) -> Result<(), LexError> {
        let c = self.cursor.current_char();
        match c {
            '"' | '\'' => self.lex_string(),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBrack),
            ']' => self.single(TokenKind::RBrack),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semi),
            ':' => self.single(TokenKind::Colon),
            '.' => self.single(TokenKind::Dot),
            '%' => self.single(TokenKind::Percent),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => self.lex_identifier(),
            c => Err(self.error(format!(
                "unrecognized character '{}' (code {})",
                c, c as u32
            ))),
        }
    }

    /// Marks the current cursor position as the start of the next token.
    pub(crate) fn begin_token(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    /// Consumes one character and pushes a token of the given kind.
    fn single(&mut self, kind: TokenKind) -> Result<(), LexError> {
        self.cursor.advance();
        self.push_token(kind);
        Ok(())
    }

    /// Pushes a token without a literal payload.
    pub(crate) fn push_token(&mut self, kind: TokenKind) {
        self.push_token_value(kind, LiteralValue::None);
    }

    /// Pushes a token with an interpreted payload. The lexeme is the
    /// source slice from the token start to the current position.
    pub(crate) fn push_token_value(&mut self, kind: TokenKind, value: LiteralValue) {
        let lexeme = self.cursor.slice_from(self.token_start);
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        self.tokens.push(Token::new(kind, lexeme, value, span));
    }

    /// Builds a [`LexError`] at the start of the current token, with the
    /// containing source line as context.
    pub(crate) fn error(&self, message: impl Into<String>) -> LexError {
        LexError::new(message, self.token_start_line, self.token_start_column)
            .with_context(self.cursor.line_text_at(self.token_start))
    }

    /// Builds a [`LexError`] at the current cursor position.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> LexError {
        LexError::new(message, self.cursor.line(), self.cursor.column())
            .with_context(self.cursor.line_text_at(self.cursor.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .scan()
            .expect("scan should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            kinds("( ) { } [ ] , ; : ."),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBrack,
                TokenKind::RBrack,
                TokenKind::Comma,
                TokenKind::Semi,
                TokenKind::Colon,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            kinds("var idade: inteiro = 25"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::TypeInt,
                TokenKind::Assign,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = Scanner::new("var x\n  = 1").scan().unwrap();
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[0].span.column, 1);
        assert_eq!(tokens[1].span.column, 5);
        assert_eq!(tokens[2].span.line, 2);
        assert_eq!(tokens[2].span.column, 3);
    }

    #[test]
    fn test_unrecognized_character() {
        let err = Scanner::new("var @x").scan().unwrap_err();
        assert!(err.message.contains("unrecognized character '@'"));
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 5);
        assert_eq!(err.context.as_deref(), Some("var @x"));
    }

    #[test]
    fn test_lexeme_is_verbatim_slice() {
        let tokens = Scanner::new("escreva(\"ola\")").scan().unwrap();
        assert_eq!(tokens[0].lexeme, "escreva");
        assert_eq!(tokens[2].lexeme, "\"ola\"");
    }
}

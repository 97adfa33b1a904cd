//! Identifier and keyword scanning.

use crate::error::LexError;
use crate::token::{keyword_from_ident, LiteralValue, TokenKind};
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans an identifier or keyword.
    ///
    /// Identifiers start with a Unicode letter or `_` and continue with
    /// letters, digits, or `_`. The result is matched case-insensitively
    /// against the keyword table; `verdadeiro`/`falso` carry their
    /// boolean payload.
    pub(crate) fn lex_identifier(&mut self) -> Result<(), LexError> {
        while self.cursor.current_char().is_alphanumeric() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        match keyword_from_ident(text) {
            Some(TokenKind::True) => self.push_token_value(TokenKind::True, LiteralValue::Bool(true)),
            Some(TokenKind::False) => {
                self.push_token_value(TokenKind::False, LiteralValue::Bool(false))
            }
            Some(kind) => self.push_token(kind),
            None => self.push_token(TokenKind::Identifier),
        }
        Ok(())
    }
}

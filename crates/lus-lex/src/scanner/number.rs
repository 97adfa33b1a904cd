//! Number literal scanning.

use crate::error::LexError;
use crate::token::{LiteralValue, TokenKind};
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans an integer or real literal.
    ///
    /// The fractional part is consumed only when the character after the
    /// dot is a digit, so `3.aplica()` lexes as `3` `.` `aplica` ...
    /// A fractional part or an exponent (`e`/`E`, optional sign)
    /// promotes the literal to real. An exponent with no digits fails.
    pub(crate) fn lex_number(&mut self) -> Result<(), LexError> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_real = false;

        if self.cursor.current_char() == '.' && self.cursor.peek_next().is_ascii_digit() {
            is_real = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            is_real = true;
            self.cursor.advance();
            if matches!(self.cursor.current_char(), '+' | '-') {
                self.cursor.advance();
            }
            if !self.cursor.current_char().is_ascii_digit() {
                return Err(self.error_here(
                    "malformed scientific notation: expected digit after 'e'",
                ));
            }
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        if is_real {
            match text.parse::<f64>() {
                Ok(value) => {
                    self.push_token_value(TokenKind::RealLiteral, LiteralValue::Real(value));
                    Ok(())
                }
                Err(_) => Err(self.error(format!("invalid real literal '{}'", text))),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => {
                    self.push_token_value(TokenKind::IntLiteral, LiteralValue::Int(value));
                    Ok(())
                }
                Err(_) => Err(self.error(format!("integer literal '{}' is out of range", text))),
            }
        }
    }
}

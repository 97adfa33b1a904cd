//! String literal scanning.

use crate::error::LexError;
use crate::token::{LiteralValue, TokenKind};
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans a string literal delimited by `"` or `'`.
    ///
    /// The closing quote must match the opening one. Recognized escapes
    /// are `\n \t \r \\ \" \'`; any other escape is preserved literally
    /// as backslash plus character. Strings may not span lines.
    pub(crate) fn lex_string(&mut self) -> Result<(), LexError> {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut value = String::new();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error("unterminated string literal: unexpected end of file"));
            }

            let c = self.cursor.current_char();

            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\n' {
                return Err(self.error("unterminated string literal: end of line reached"));
            }

            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(
                        self.error("unterminated string literal after escape character")
                    );
                }
                let escape = self.cursor.current_char();
                self.cursor.advance();
                match escape {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    '\'' => value.push('\''),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
            } else {
                value.push(c);
                self.cursor.advance();
            }
        }

        self.push_token_value(TokenKind::TextLiteral, LiteralValue::Text(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{LiteralValue, TokenKind};
    use crate::{Scanner, Token};

    fn first(source: &str) -> Token {
        Scanner::new(source).scan().unwrap().remove(0)
    }

    fn text(source: &str) -> String {
        match first(source).value {
            LiteralValue::Text(s) => s,
            other => panic!("expected text literal, got {:?}", other),
        }
    }

    #[test]
    fn test_double_quoted() {
        let token = first("\"Ola, Mundo!\"");
        assert_eq!(token.kind, TokenKind::TextLiteral);
        assert_eq!(token.value, LiteralValue::Text("Ola, Mundo!".into()));
        assert_eq!(token.lexeme, "\"Ola, Mundo!\"");
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(text("'abc'"), "abc");
    }

    #[test]
    fn test_quote_inside_other_quote() {
        assert_eq!(text("\"d'agua\""), "d'agua");
        assert_eq!(text("'disse \"oi\"'"), "disse \"oi\"");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(text(r#""a\nb\tc\rd""#), "a\nb\tc\rd");
        assert_eq!(text(r#""x\\y""#), "x\\y");
        assert_eq!(text(r#""diz \"oi\"""#), "diz \"oi\"");
    }

    #[test]
    fn test_unknown_escape_preserved() {
        assert_eq!(text(r#""a\qb""#), "a\\qb");
    }

    #[test]
    fn test_unterminated_at_eof() {
        let err = Scanner::new("\"aberta").scan().unwrap_err();
        assert!(err.message.contains("end of file"));
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_unterminated_at_newline() {
        let err = Scanner::new("var s = \"aberta\nvar t = 1").scan().unwrap_err();
        assert!(err.message.contains("end of line"));
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 9);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(text("\"\""), "");
    }
}

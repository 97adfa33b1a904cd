//! Whitespace and comment skipping.

use crate::error::LexError;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Skips whitespace and comments up to the next token start.
    ///
    /// Whitespace is ` `, `\t`, `\r`, `\n`. Line comments run from `//`
    /// to the end of the line; block comments from `/*` to `*/` and do
    /// not nest.
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                '/' => match self.cursor.peek_next() {
                    '/' => self.skip_line_comment(),
                    '*' => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Skips a `//` comment up to (not including) the newline.
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    /// Skips a `/* ... */` comment. Fails if the file ends first.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_line = self.cursor.line();
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.current_char() == '*' && self.cursor.peek_next() == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(());
            }
            self.cursor.advance();
        }

        Err(self.error_here(format!(
            "unterminated block comment (started at line {})",
            start_line
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Scanner;

    #[test]
    fn test_line_comment_skipped() {
        let tokens = Scanner::new("// comentario\nvar x").scan().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[0].span.line, 2);
    }

    #[test]
    fn test_block_comment_skipped() {
        let tokens = Scanner::new("/* um\n   dois */ 42").scan().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].span.line, 2);
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        // The first `*/` closes the comment; the rest is real input.
        let tokens = Scanner::new("/* /* */ x").scan().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "x");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Scanner::new("var x /* aberto\nainda").scan().unwrap_err();
        assert!(err.message.contains("unterminated block comment"));
        assert!(err.message.contains("line 1"));
    }

    #[test]
    fn test_comment_at_eof() {
        let tokens = Scanner::new("x // fim").scan().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

//! Multi-character operator scanning.
//!
//! Single-character delimiters are handled directly in the dispatch;
//! this module covers the operators where longest-match matters.

use crate::error::LexError;
use crate::token::TokenKind;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans `+` or `+=`.
    pub(crate) fn lex_plus(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::PlusEq);
        } else {
            self.push_token(TokenKind::Plus);
        }
        Ok(())
    }

    /// Scans `-`, `-=`, or `->`.
    pub(crate) fn lex_minus(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::MinusEq);
        } else if self.cursor.match_char('>') {
            self.push_token(TokenKind::Arrow);
        } else {
            self.push_token(TokenKind::Minus);
        }
        Ok(())
    }

    /// Scans `*`, `**`, or `*=`.
    pub(crate) fn lex_star(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            self.push_token(TokenKind::Power);
        } else if self.cursor.match_char('=') {
            self.push_token(TokenKind::StarEq);
        } else {
            self.push_token(TokenKind::Star);
        }
        Ok(())
    }

    /// Scans `/` or `/=`.
    ///
    /// `//` and `/*` never reach this point: the whitespace skipper runs
    /// before each token and consumes comments.
    pub(crate) fn lex_slash(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::SlashEq);
        } else {
            self.push_token(TokenKind::Slash);
        }
        Ok(())
    }

    /// Scans `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::Eq);
        } else {
            self.push_token(TokenKind::Assign);
        }
        Ok(())
    }

    /// Scans `!=`. A lone `!` is an error: the language spells logical
    /// negation `nao`.
    pub(crate) fn lex_bang(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::Ne);
            Ok(())
        } else {
            Err(self.error("unexpected character '!': did you mean 'nao' or '!='?"))
        }
    }

    /// Scans `<` or `<=`.
    pub(crate) fn lex_less(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::Le);
        } else {
            self.push_token(TokenKind::Lt);
        }
        Ok(())
    }

    /// Scans `>` or `>=`.
    pub(crate) fn lex_greater(&mut self) -> Result<(), LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.push_token(TokenKind::Ge);
        } else {
            self.push_token(TokenKind::Gt);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Scanner;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut tokens: Vec<_> = Scanner::new(source)
            .scan()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(tokens.pop(), Some(TokenKind::Eof));
        tokens
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(
            kinds("+ - * / % **"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Power,
            ]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("== != < <= > >="),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
            ]
        );
    }

    #[test]
    fn test_compound_assignment_operators() {
        assert_eq!(
            kinds("= += -= *= /="),
            vec![
                TokenKind::Assign,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
            ]
        );
    }

    #[test]
    fn test_longest_match() {
        // `**=` lexes as `**` followed by `=`.
        assert_eq!(
            kinds("**="),
            vec![TokenKind::Power, TokenKind::Assign]
        );
        // `===` lexes as `==` followed by `=`.
        assert_eq!(kinds("==="), vec![TokenKind::Eq, TokenKind::Assign]);
    }

    #[test]
    fn test_arrow() {
        assert_eq!(kinds("->"), vec![TokenKind::Arrow]);
    }

    #[test]
    fn test_lone_bang_is_error() {
        let err = Scanner::new("se (!x)").scan().unwrap_err();
        assert!(err.message.contains("'nao' or '!='"));
        assert_eq!(err.column, 5);
    }

    #[test]
    fn test_slash_after_comment_skip() {
        assert_eq!(kinds("a / b"), vec![
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
        ]);
    }
}

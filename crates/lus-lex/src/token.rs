//! Token definitions for the Lusitano language.
//!
//! A [`Token`] pairs a [`TokenKind`] with the verbatim source lexeme, the
//! interpreted literal payload, and the source span of its first
//! character. The kind set is closed; `Newline` and `Comment` exist as
//! reserved kinds but are never produced by the scanner.

use std::fmt;
use std::sync::OnceLock;

use lus_util::{FxHashMap, Span};

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    RealLiteral,
    TextLiteral,
    True,
    False,

    // Identifiers
    Identifier,

    // Type keywords
    TypeInt,
    TypeReal,
    TypeText,
    TypeBool,
    TypeVoid,

    // Control keywords
    If,
    Else,
    ElseIf,
    While,
    For,
    From,
    To,
    Step,
    Do,
    Repeat,

    // Function keywords
    Function,
    Return,

    // I/O keywords
    Print,
    Input,

    // Logical keywords
    And,
    Or,
    Not,

    // Declaration keywords
    Var,
    Const,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBrack,
    RBrack,
    Comma,
    Semi,
    Colon,
    Dot,
    Arrow,

    // Special
    Eof,
    /// Reserved; the scanner skips newlines as whitespace.
    Newline,
    /// Reserved; the scanner discards comments.
    Comment,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Interpreted payload of a token.
///
/// `None` for everything that is not a literal; the lexeme carries the
/// spelling either way.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    None,
}

/// One lexical unit of the source program.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim source slice.
    pub lexeme: String,
    /// Interpreted payload for literal kinds.
    pub value: LiteralValue,
    pub span: Span,
}

impl Token {
    /// Creates a token.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::{LiteralValue, Token, TokenKind};
    /// use lus_util::Span;
    ///
    /// let token = Token::new(
    ///     TokenKind::IntLiteral,
    ///     "42",
    ///     LiteralValue::Int(42),
    ///     Span::point(1, 9),
    /// );
    /// assert_eq!(token.lexeme, "42");
    /// assert_eq!(token.span.column, 9);
    /// ```
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, value: LiteralValue, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            value,
            span,
        }
    }

    /// The end-of-file marker; the only token with an empty lexeme.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::{Token, TokenKind};
    /// use lus_util::Span;
    ///
    /// let eof = Token::eof(Span::point(3, 1));
    /// assert_eq!(eof.kind, TokenKind::Eof);
    /// assert!(eof.lexeme.is_empty());
    /// ```
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", LiteralValue::None, span)
    }
}

/// Keyword table, keyed by the lowercase spelling.
fn keyword_table() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        FxHashMap::from_iter([
            // Types
            ("inteiro", TokenKind::TypeInt),
            ("real", TokenKind::TypeReal),
            ("texto", TokenKind::TypeText),
            ("logico", TokenKind::TypeBool),
            ("vazio", TokenKind::TypeVoid),
            // Boolean literals
            ("verdadeiro", TokenKind::True),
            ("falso", TokenKind::False),
            // Control flow
            ("se", TokenKind::If),
            ("senao", TokenKind::Else),
            ("senaose", TokenKind::ElseIf),
            ("enquanto", TokenKind::While),
            ("para", TokenKind::For),
            ("de", TokenKind::From),
            ("ate", TokenKind::To),
            ("passo", TokenKind::Step),
            ("faca", TokenKind::Do),
            ("repita", TokenKind::Repeat),
            // Functions
            ("funcao", TokenKind::Function),
            ("retorna", TokenKind::Return),
            // I/O
            ("escreva", TokenKind::Print),
            ("leia", TokenKind::Input),
            // Logical operators
            ("e", TokenKind::And),
            ("ou", TokenKind::Or),
            ("nao", TokenKind::Not),
            // Declarations
            ("var", TokenKind::Var),
            ("const", TokenKind::Const),
        ])
    })
}

/// Maps an identifier to its keyword kind, if it is one.
///
/// Keyword matching is case-insensitive: `SE`, `Se` and `se` all lex as
/// [`TokenKind::If`].
///
/// # Examples
///
/// ```
/// use lus_lex::{keyword_from_ident, TokenKind};
///
/// assert_eq!(keyword_from_ident("funcao"), Some(TokenKind::Function));
/// assert_eq!(keyword_from_ident("Enquanto"), Some(TokenKind::While));
/// assert_eq!(keyword_from_ident("soma"), None);
/// ```
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    let lower = text.to_lowercase();
    keyword_table().get(lower.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword_from_ident("funcao"), Some(TokenKind::Function));
        assert_eq!(keyword_from_ident("se"), Some(TokenKind::If));
        assert_eq!(keyword_from_ident("verdadeiro"), Some(TokenKind::True));
        assert_eq!(keyword_from_ident("escreva"), Some(TokenKind::Print));
        assert_eq!(keyword_from_ident("minhaVar"), None);
    }

    #[test]
    fn test_keyword_lookup_case_insensitive() {
        assert_eq!(keyword_from_ident("SE"), Some(TokenKind::If));
        assert_eq!(keyword_from_ident("Funcao"), Some(TokenKind::Function));
        assert_eq!(keyword_from_ident("VERDADEIRO"), Some(TokenKind::True));
    }

    #[test]
    fn test_reserved_keywords() {
        // Tokenized but not consumed by any grammar rule.
        assert_eq!(keyword_from_ident("faca"), Some(TokenKind::Do));
        assert_eq!(keyword_from_ident("repita"), Some(TokenKind::Repeat));
    }

    #[test]
    fn test_eof_token() {
        let token = Token::eof(Span::point(10, 1));
        assert_eq!(token.kind, TokenKind::Eof);
        assert!(token.lexeme.is_empty());
        assert_eq!(token.value, LiteralValue::None);
    }
}

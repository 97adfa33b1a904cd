//! lus-lex - Lexical Analyzer (Scanner/Tokenizer)
//!
//! ============================================================================
//! LEXICAL ANALYSIS OVERVIEW
//! ============================================================================
//!
//! The first phase of the pipeline: it turns a UTF-8 source string into
//! a vector of [`Token`]s terminated by exactly one `Eof` token. Each
//! token records its kind, the verbatim source lexeme, the interpreted
//! literal payload, and the 1-based line/column where it starts.
//!
//! ============================================================================
//! TOKEN CATEGORIES
//! ============================================================================
//!
//! | Category    | Examples                                        |
//! |-------------|-------------------------------------------------|
//! | Literals    | `42`, `3.14`, `"texto"`, `verdadeiro`, `falso`  |
//! | Keywords    | `funcao`, `se`, `enquanto`, `para`, `var`, ...  |
//! | Identifiers | `soma`, `minha_variavel`, `preço`               |
//! | Operators   | `+ - * / % ** == != < <= > >= = += -= *= /= ->` |
//! | Delimiters  | `( ) { } [ ] , ; : .`                           |
//!
//! Keywords are Portuguese and matched case-insensitively. Whitespace
//! and comments (`//` and `/* */`) separate tokens and are discarded.
//! Identifiers start with a Unicode letter or `_` and continue with
//! letters, digits, or `_`.
//!
//! ============================================================================
//! ERROR CONTRACT
//! ============================================================================
//!
//! Lexing is fatal-on-first-error: [`Scanner::scan`] returns
//! `Result<Vec<Token>, LexError>`, and the caller converts the error
//! into a diagnostic. This differs from the later stages, which
//! accumulate diagnostics and keep going. Everything after the first
//! unrecognized construct would be unreliable, so nothing is produced.
//!
//! # Examples
//!
//! ```
//! use lus_lex::{tokenize, TokenKind};
//!
//! let tokens = tokenize("escreva(\"Ola\")").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Print);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

pub mod cursor;
pub mod error;
pub mod scanner;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use error::LexError;
pub use scanner::Scanner;
pub use token::{keyword_from_ident, LiteralValue, Token, TokenKind};

/// Tokenizes a complete source string.
///
/// Convenience wrapper around [`Scanner::scan`].
///
/// # Examples
///
/// ```
/// use lus_lex::{tokenize, LiteralValue, TokenKind};
///
/// let tokens = tokenize("var x = 42").unwrap();
/// assert_eq!(tokens[1].lexeme, "x");
/// assert_eq!(tokens[3].value, LiteralValue::Int(42));
///
/// assert!(tokenize("var x = @").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(source).scan()
}

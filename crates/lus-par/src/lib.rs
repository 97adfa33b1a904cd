//! lus-par - Parser (Syntactic Analyzer)
//!
//! ============================================================================
//! PARSING OVERVIEW
//! ============================================================================
//!
//! Consumes the token stream produced by `lus-lex` and builds the AST
//! defined in [`ast`] by recursive descent: one function per grammar
//! rule, with left recursion expressed as iteration and `**` as the one
//! right-recursive level.
//!
//! ============================================================================
//! GRAMMAR
//! ============================================================================
//!
//! From lowest to highest precedence:
//!
//! ```ebnf
//! program      = { declaration } EOF
//! declaration  = function_decl | var_decl | statement
//! var_decl     = ("var"|"const") IDENT [ ":" type ] [ "=" expression ] [ ";" ]
//! function_decl= "funcao" IDENT "(" [ param {"," param} ] ")" [ ":" type ] block
//! statement    = if | while | for | print | input | return | block | expr_stmt
//!
//! expression   = assignment
//! assignment   = IDENT ("="|"+="|"-="|"*="|"/=") assignment | logical_or
//! logical_or   = logical_and { "ou" logical_and }
//! logical_and  = equality    { "e"  equality }
//! equality     = comparison  { ("=="|"!=") comparison }
//! comparison   = term        { ("<"|"<="|">"|">=") term }
//! term         = factor      { ("+"|"-") factor }
//! factor       = power       { ("*"|"/"|"%") power }
//! power        = unary       [ "**" power ]
//! unary        = ("nao"|"-") unary | call
//! call         = primary { "(" [ args ] ")" | "[" expression "]" }
//! ```
//!
//! ============================================================================
//! ERROR RECOVERY
//! ============================================================================
//!
//! The declaration parser returns `Result`; on error the parser emits a
//! diagnostic, discards tokens until just after a `;` or until the next
//! statement-starting keyword, and resumes. One run can therefore report
//! several syntax errors. Statement terminators (`;`) are always
//! optional and only ever consumed, never required.
//!
//! # Examples
//!
//! ```
//! use lus_lex::tokenize;
//! use lus_par::{Parser, Stmt};
//! use lus_util::Handler;
//!
//! let mut handler = Handler::new();
//! let tokens = tokenize("funcao principal() { escreva(1) }").unwrap();
//! let program = Parser::new(tokens, &mut handler).parse();
//!
//! assert!(!handler.has_errors());
//! assert!(matches!(program.decls[0], Stmt::Function(_)));
//! ```

pub mod ast;
pub mod error;
mod expr;
mod items;
mod pretty;
mod stmt;

pub use ast::{
    BinOp, Expr, FunctionDecl, Literal, LogicalOp, Param, Program, Stmt, TypeName, UnOp,
};
pub use error::ParseError;
pub use pretty::render as render_ast;

use lus_lex::{Token, TokenKind};
use lus_util::Handler;

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Keywords the panic-mode recovery stops in front of.
const SYNC_KEYWORDS: [TokenKind; 8] = [
    TokenKind::Function,
    TokenKind::Var,
    TokenKind::Const,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
    TokenKind::Print,
];

/// Recursive-descent parser.
pub struct Parser<'a> {
    /// Token stream ending in `Eof`.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    position: usize,

    /// Shared diagnostic sink.
    handler: &'a mut Handler,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a token stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::tokenize;
    /// use lus_par::Parser;
    /// use lus_util::Handler;
    ///
    /// let mut handler = Handler::new();
    /// let tokens = tokenize("var x = 1").unwrap();
    /// let parser = Parser::new(tokens, &mut handler);
    /// ```
    pub fn new(tokens: Vec<Token>, handler: &'a mut Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    /// Parses a complete program.
    ///
    /// Never fails: syntax errors are emitted to the handler and the
    /// parser resynchronizes. Callers must check the handler before
    /// trusting the returned tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::tokenize;
    /// use lus_par::{Parser, Stmt};
    /// use lus_util::Handler;
    ///
    /// let mut handler = Handler::new();
    /// let tokens = tokenize("var a = 1\nescreva(a)").unwrap();
    /// let program = Parser::new(tokens, &mut handler).parse();
    ///
    /// assert_eq!(program.decls.len(), 2);
    /// assert!(matches!(program.decls[0], Stmt::VarDecl { .. }));
    /// assert!(matches!(program.decls[1], Stmt::Print { .. }));
    /// ```
    pub fn parse(&mut self) -> Program {
        let mut decls = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration_or_recover() {
                decls.push(stmt);
            }
        }

        Program { decls }
    }

    /// Parses one declaration, emitting and recovering on error.
    pub(crate) fn declaration_or_recover(&mut self) -> Option<Stmt> {
        match self.declaration() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.handler.emit(err.to_diagnostic());
                self.synchronize();
                None
            }
        }
    }

    /// Panic-mode recovery: discard tokens until just after a `;` or
    /// until the next token starts a statement.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semi {
                return;
            }
            if SYNC_KEYWORDS.contains(&self.current().kind) {
                return;
            }
            self.advance();
        }
    }

    // Token stream helpers

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Advances one token and returns the one just consumed.
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    /// True if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consumes the current token if its kind is in `kinds`.
    pub(crate) fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&k| self.check(k)) && !self.is_at_end() {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes a token of the expected kind or fails with `message`.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error(message))
        }
    }

    /// Builds a [`ParseError`] at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.current().clone())
    }
}

/// Parses a token stream into a program, reporting errors to `handler`.
///
/// # Examples
///
/// ```
/// use lus_lex::tokenize;
/// use lus_util::Handler;
///
/// let mut handler = Handler::new();
/// let tokens = tokenize("se (").unwrap();
/// let program = lus_par::parse(tokens, &mut handler);
///
/// assert!(handler.has_errors());
/// assert!(program.decls.is_empty());
/// ```
pub fn parse(tokens: Vec<Token>, handler: &mut Handler) -> Program {
    Parser::new(tokens, handler).parse()
}

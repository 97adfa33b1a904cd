//! lus-sem - Semantic Analyzer
//!
//! ============================================================================
//! SEMANTIC ANALYSIS OVERVIEW
//! ============================================================================
//!
//! The third phase of the pipeline. Takes the AST produced by `lus-par`
//! and validates it against the type and scope discipline:
//!
//! - names declared before use; no duplicates within one scope frame;
//!   shadowing of outer frames allowed
//! - type compatibility (equality up to `inteiro`/`real` promotion) at
//!   declarations, assignments, calls, and returns
//! - `logico` conditions on `se`/`enquanto`; numeric bounds on `para`
//! - return discipline per function, with warnings for paths that fall
//!   off the end of a non-`vazio` function
//! - assignment and `leia` targets must not be constants
//!
//! ============================================================================
//! ERROR CONTRACT
//! ============================================================================
//!
//! Analysis never aborts on an expected user-program failure. Errors and
//! warnings accumulate in the shared [`Handler`](lus_util::Handler);
//! [`SemanticAnalyzer::analyze`] returns `true` only when it added no
//! errors, and emission must be skipped when it returns `false`. The
//! `Error` type is a propagating sink, so one mistake yields one
//! diagnostic rather than a cascade.
//!
//! ============================================================================
//! BUILTINS
//! ============================================================================
//!
//! `paraInteiro`, `paraReal`, `paraTexto`, `raiz`, `absoluto`,
//! `arredonda`, and `tamanho` are pre-declared in the global frame; the
//! conversion builtins take one `desconhecido` parameter, which the
//! compatibility predicate accepts for any argument.
//!
//! # Examples
//!
//! ```
//! use lus_lex::tokenize;
//! use lus_par::Parser;
//! use lus_sem::SemanticAnalyzer;
//! use lus_util::Handler;
//!
//! let mut handler = Handler::new();
//! let tokens = tokenize("funcao principal() { escreva(tamanho(\"abc\")) }").unwrap();
//! let program = Parser::new(tokens, &mut handler).parse();
//!
//! let mut analyzer = SemanticAnalyzer::new(&mut handler);
//! assert!(analyzer.analyze(&program));
//! ```

pub mod analyzer;
pub mod symbol;
pub mod types;

pub use analyzer::SemanticAnalyzer;
pub use symbol::{Symbol, SymbolCategory, SymbolTable};
pub use types::{binary_result, compatible, Type};

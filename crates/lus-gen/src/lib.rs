//! lus-gen - Code Emission (Transpiler Back End)
//!
//! ============================================================================
//! EMISSION OVERVIEW
//! ============================================================================
//!
//! The final phase: turns an AST that passed semantic analysis into an
//! executable Python program. Emission is a pure function of the tree;
//! it produces no diagnostics and must not be reached when earlier
//! stages reported errors.
//!
//! ============================================================================
//! EMITTED PROGRAM SHAPE
//! ============================================================================
//!
//! The emitted program is self-contained:
//!
//! 1. a preamble defines the language builtins in terms of Python
//!    primitives (`int`, `float`, `str`, `abs`, `round`, `len`, `**`)
//! 2. the translated declarations follow, with every binary, unary, and
//!    logical sub-expression parenthesized so precedence survives the
//!    round trip
//! 3. a trailer calls `principal()` when the program defined one,
//!    silently doing nothing otherwise
//!
//! # Examples
//!
//! ```
//! use lus_lex::tokenize;
//! use lus_par::Parser;
//! use lus_util::Handler;
//!
//! let mut handler = Handler::new();
//! let tokens = tokenize("funcao principal() { escreva(2 + 3 * 4) }").unwrap();
//! let program = Parser::new(tokens, &mut handler).parse();
//!
//! let python = lus_gen::emit(&program);
//! assert!(python.contains("print((2 + (3 * 4)), sep='')"));
//! assert!(python.contains("if __name__ == '__main__':"));
//! ```

pub mod python;

pub use python::PyEmitter;

use lus_par::Program;

/// Emits a Python program for an analyzed AST.
///
/// # Examples
///
/// ```
/// use lus_lex::tokenize;
/// use lus_par::Parser;
/// use lus_util::Handler;
///
/// let mut handler = Handler::new();
/// let tokens = tokenize("escreva(\"Ola\")").unwrap();
/// let program = Parser::new(tokens, &mut handler).parse();
///
/// assert!(lus_gen::emit(&program).contains("print(\"Ola\", sep='')"));
/// ```
pub fn emit(program: &Program) -> String {
    PyEmitter::new().emit_program(program)
}

//! lus-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the two foundations every phase of the Lusitano
//! compiler agrees on:
//!
//! - [`Span`] - source locations (byte range plus 1-based line/column),
//!   attached to every token and AST node so diagnostics can point back
//!   into the program text.
//! - [`Diagnostic`] / [`Handler`] - the diagnostic model. Every stage
//!   reports user-program problems as values collected by a `Handler`;
//!   panics are reserved for bugs in the compiler itself.
//!
//! ============================================================================
//! DIAGNOSTIC MODEL
//! ============================================================================
//!
//! A diagnostic carries a severity ([`Level`]), the stage that produced
//! it ([`Stage`]), a message, a span, and an optional source snippet.
//! The handler preserves insertion order, which keeps output
//! deterministic: each stage appends in source order, and stages run in
//! pipeline order.
//!
//! The renderer produces the framed, caret-annotated blocks the
//! compiler is known for:
//!
//! ```text
//! ╔══════════════════════════════════════════════════════════════╗
//! ║  SEMANTIC ERROR at line 3, column 5
//! ╠══════════════════════════════════════════════════════════════╣
//! ║  cannot assign to constant 'PI'
//! ╚══════════════════════════════════════════════════════════════╝
//! ```
//!
//! Warnings render as a single line and never block emission.
//!
//! # Examples
//!
//! ```
//! use lus_util::{Diagnostic, Handler, Span, Stage};
//!
//! let mut handler = Handler::new();
//! handler.emit(Diagnostic::error(Stage::Lex, "unexpected character", Span::point(1, 3)));
//!
//! assert!(handler.has_errors());
//! assert!(handler.render_all().contains("LEX ERROR at line 1, column 3"));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, Handler, Level, SourceSnippet, Stage};
pub use span::Span;

// Re-export the hash map used in hot paths (keyword table, lookups).
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

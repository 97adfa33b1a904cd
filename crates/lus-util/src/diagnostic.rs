//! Diagnostic model - error and warning reporting for all compiler stages.
//!
//! Every stage reports problems in the user's program as [`Diagnostic`]
//! values pushed into a shared [`Handler`]. Errors block emission;
//! warnings do not. Rendering reproduces the framed blocks with an
//! optional source-line context and a caret under the offending column.

use std::fmt;

use crate::span::Span;

/// Diagnostic severity.
///
/// # Examples
///
/// ```
/// use lus_util::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Blocks emission.
    Error,
    /// Reported but does not block emission.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// Compiler stage that produced a diagnostic.
///
/// # Examples
///
/// ```
/// use lus_util::Stage;
///
/// assert_eq!(format!("{}", Stage::Lex), "LEX");
/// assert_eq!(format!("{}", Stage::Semantic), "SEMANTIC");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Semantic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "LEX"),
            Stage::Parse => write!(f, "PARSE"),
            Stage::Semantic => write!(f, "SEMANTIC"),
        }
    }
}

/// Source line shown under a diagnostic, with a caret column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSnippet {
    /// The full source line, without its trailing newline.
    pub line_text: String,
    /// Column (1-based) the caret points at.
    pub caret_column: u32,
}

impl SourceSnippet {
    /// Creates a snippet pointing at `caret_column` of `line_text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::SourceSnippet;
    ///
    /// let snippet = SourceSnippet::new("var @x = 1", 5);
    /// assert_eq!(snippet.caret_column, 5);
    /// ```
    pub fn new(line_text: impl Into<String>, caret_column: u32) -> Self {
        Self {
            line_text: line_text.into(),
            caret_column,
        }
    }
}

/// A single diagnostic message.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub stage: Stage,
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub snippet: Option<SourceSnippet>,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Level, Span, Stage};
    ///
    /// let diag = Diagnostic::error(Stage::Parse, "unexpected token", Span::DUMMY);
    /// assert_eq!(diag.level, Level::Error);
    /// assert_eq!(diag.stage, Stage::Parse);
    /// ```
    pub fn error(stage: Stage, message: impl Into<String>, span: Span) -> Self {
        Self {
            stage,
            level: Level::Error,
            message: message.into(),
            span,
            snippet: None,
        }
    }

    /// Creates a warning diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Level, Span, Stage};
    ///
    /// let diag = Diagnostic::warning(Stage::Semantic, "unused variable", Span::DUMMY);
    /// assert_eq!(diag.level, Level::Warning);
    /// ```
    pub fn warning(stage: Stage, message: impl Into<String>, span: Span) -> Self {
        Self {
            stage,
            level: Level::Warning,
            message: message.into(),
            span,
            snippet: None,
        }
    }

    /// Attaches a source-line context to this diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, SourceSnippet, Span, Stage};
    ///
    /// let diag = Diagnostic::error(Stage::Lex, "unexpected character", Span::point(1, 5))
    ///     .with_snippet(SourceSnippet::new("var @x = 1", 5));
    /// assert!(diag.snippet.is_some());
    /// ```
    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    /// Renders the diagnostic as user-facing text.
    ///
    /// Errors get the framed block; warnings render as a single line.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Span, Stage};
    ///
    /// let error = Diagnostic::error(Stage::Semantic, "type mismatch", Span::point(3, 7));
    /// assert!(error.render().contains("SEMANTIC ERROR at line 3, column 7"));
    ///
    /// let warning = Diagnostic::warning(Stage::Semantic, "unused", Span::point(2, 1));
    /// assert_eq!(warning.render(), "warning (line 2, column 1): unused");
    /// ```
    pub fn render(&self) -> String {
        match self.level {
            Level::Warning => format!(
                "warning (line {}, column {}): {}",
                self.span.line, self.span.column, self.message
            ),
            Level::Error => self.render_frame(),
        }
    }

    fn render_frame(&self) -> String {
        const BAR: &str = "══════════════════════════════════════════════════════════════";
        let mut out = String::new();
        out.push_str(&format!("╔{}╗\n", BAR));
        out.push_str(&format!(
            "║  {} ERROR at line {}, column {}\n",
            self.stage, self.span.line, self.span.column
        ));
        out.push_str(&format!("╠{}╣\n", BAR));
        out.push_str(&format!("║  {}\n", self.message));
        if let Some(snippet) = &self.snippet {
            out.push_str(&format!("╠{}╣\n", BAR));
            out.push_str(&format!("║  Context: {}\n", snippet.line_text));
            let pad = "Context: ".len() + snippet.caret_column.saturating_sub(1) as usize;
            out.push_str(&format!("║  {}^\n", " ".repeat(pad)));
        }
        out.push_str(&format!("╚{}╝", BAR));
        out
    }
}

/// Collects diagnostics from every stage of a compilation.
///
/// Insertion order is preserved, which keeps the printed output
/// deterministic: each stage appends in source order, and stages run in
/// pipeline order.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    /// Creates an empty handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::Handler;
    ///
    /// let handler = Handler::new();
    /// assert!(!handler.has_errors());
    /// ```
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Records a diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Handler, Span, Stage};
    ///
    /// let mut handler = Handler::new();
    /// handler.emit(Diagnostic::error(Stage::Parse, "unexpected token", Span::DUMMY));
    /// assert_eq!(handler.diagnostics().len(), 1);
    /// ```
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if any error has been reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Handler, Span, Stage};
    ///
    /// let mut handler = Handler::new();
    /// handler.emit(Diagnostic::warning(Stage::Semantic, "unused", Span::DUMMY));
    /// assert!(!handler.has_errors());
    ///
    /// handler.emit(Diagnostic::error(Stage::Semantic, "type mismatch", Span::DUMMY));
    /// assert!(handler.has_errors());
    /// ```
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    /// Number of errors reported so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Handler, Span, Stage};
    ///
    /// let mut handler = Handler::new();
    /// handler.emit(Diagnostic::error(Stage::Lex, "bad escape", Span::DUMMY));
    /// handler.emit(Diagnostic::warning(Stage::Semantic, "unused", Span::DUMMY));
    /// assert_eq!(handler.error_count(), 1);
    /// assert_eq!(handler.warning_count(), 1);
    /// ```
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Number of warnings reported so far.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// All collected diagnostics, in insertion order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Renders every diagnostic, one block/line each.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_util::{Diagnostic, Handler, Span, Stage};
    ///
    /// let mut handler = Handler::new();
    /// handler.emit(Diagnostic::warning(Stage::Semantic, "primeiro", Span::DUMMY));
    /// handler.emit(Diagnostic::warning(Stage::Semantic, "segundo", Span::DUMMY));
    ///
    /// let rendered = handler.render_all();
    /// assert!(rendered.find("primeiro").unwrap() < rendered.find("segundo").unwrap());
    /// ```
    pub fn render_all(&self) -> String {
        self.diagnostics
            .iter()
            .map(Diagnostic::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

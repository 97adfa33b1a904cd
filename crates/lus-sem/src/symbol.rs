//! Symbol table with nested scope frames.
//!
//! A stack of frames; the bottom frame is the global scope and is
//! pre-populated with the builtin functions before traversal. Lookup
//! searches inner to outer. Names are unique within one frame; shadowing
//! an outer frame is allowed.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::types::Type;

/// What a symbol names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolCategory {
    Variable,
    Constant,
    Parameter,
    Function,
}

impl SymbolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolCategory::Variable => "variable",
            SymbolCategory::Constant => "constant",
            SymbolCategory::Parameter => "parameter",
            SymbolCategory::Function => "function",
        }
    }
}

/// One entry in the symbol table.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub category: SymbolCategory,
    /// Depth of the frame the symbol was declared in (0 = global).
    pub scope_depth: usize,
    pub line: u32,
    pub column: u32,
    pub is_const: bool,
    pub initialized: bool,
    /// Parameter names and types, for function symbols.
    pub params: Vec<(String, Type)>,
    /// Declared return type, for function symbols.
    pub return_type: Option<Type>,
}

impl Symbol {
    /// A variable, constant, or parameter symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_sem::{Symbol, SymbolCategory, Type};
    ///
    /// let symbol = Symbol::value("pi", Type::Real, SymbolCategory::Constant, 3, 7);
    /// assert!(symbol.is_const);
    /// assert!(!symbol.initialized);
    /// ```
    pub fn value(
        name: impl Into<String>,
        ty: Type,
        category: SymbolCategory,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            category,
            scope_depth: 0,
            line,
            column,
            is_const: category == SymbolCategory::Constant,
            initialized: false,
            params: Vec::new(),
            return_type: None,
        }
    }

    /// A function symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_sem::{Symbol, Type};
    ///
    /// let symbol = Symbol::function(
    ///     "dobro",
    ///     vec![("n".to_string(), Type::Int)],
    ///     Type::Int,
    ///     1,
    ///     8,
    /// );
    /// assert_eq!(symbol.ty, Type::Function);
    /// assert_eq!(symbol.return_type, Some(Type::Int));
    /// ```
    pub fn function(
        name: impl Into<String>,
        params: Vec<(String, Type)>,
        return_type: Type,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            name: name.into(),
            ty: Type::Function,
            category: SymbolCategory::Function,
            scope_depth: 0,
            line,
            column,
            is_const: false,
            initialized: true,
            params,
            return_type: Some(return_type),
        }
    }
}

/// Scoped symbol table.
///
/// Frames are `IndexMap`s so the rendered table lists symbols in
/// declaration order.
///
/// # Examples
///
/// ```
/// use lus_sem::{Symbol, SymbolCategory, SymbolTable, Type};
///
/// let mut table = SymbolTable::new();
/// table.declare(Symbol::value("x", Type::Int, SymbolCategory::Variable, 1, 5));
///
/// table.enter_scope();
/// table.declare(Symbol::value("x", Type::Text, SymbolCategory::Variable, 2, 5));
/// assert_eq!(table.lookup("x").unwrap().ty, Type::Text);
///
/// table.exit_scope();
/// assert_eq!(table.lookup("x").unwrap().ty, Type::Int);
/// ```
pub struct SymbolTable {
    scopes: Vec<IndexMap<String, Symbol>>,
    /// Snapshot of every declaration ever made, for the table dump.
    history: Vec<Symbol>,
}

impl SymbolTable {
    /// Creates a table with an empty global frame.
    pub fn new() -> Self {
        Self {
            scopes: vec![IndexMap::new()],
            history: Vec::new(),
        }
    }

    /// Current scope depth (0 = global).
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Pushes a new innermost frame.
    pub fn enter_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Pops the innermost frame, destroying its symbols wholesale.
    /// The global frame is never popped.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declares a symbol in the current frame.
    ///
    /// Returns `false` without inserting when the name already exists in
    /// the current frame (the caller reports the duplicate).
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_sem::{Symbol, SymbolCategory, SymbolTable, Type};
    ///
    /// let mut table = SymbolTable::new();
    /// let var = |line| Symbol::value("x", Type::Int, SymbolCategory::Variable, line, 1);
    ///
    /// assert!(table.declare(var(1)));
    /// assert!(!table.declare(var(2)));
    /// ```
    pub fn declare(&mut self, mut symbol: Symbol) -> bool {
        let depth = self.depth();
        if self.scopes[depth].contains_key(&symbol.name) {
            return false;
        }
        symbol.scope_depth = depth;
        self.history.push(symbol.clone());
        self.scopes[depth].insert(symbol.name.clone(), symbol);
        true
    }

    /// Looks a name up from the innermost frame outward.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_sem::{Symbol, SymbolCategory, SymbolTable, Type};
    ///
    /// let mut table = SymbolTable::new();
    /// table.declare(Symbol::value("total", Type::Int, SymbolCategory::Variable, 1, 1));
    /// table.enter_scope();
    ///
    /// assert!(table.lookup("total").is_some());
    /// assert!(table.lookup_local("total").is_none());
    /// assert!(table.lookup("fantasma").is_none());
    /// ```
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Mutable lookup, innermost frame outward.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
    }

    /// Looks a name up in the current frame only.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes.last().and_then(|frame| frame.get(name))
    }

    /// Renders every declaration made during analysis as a table.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<18} {:<12} {:<10} {:<6} {}",
            "name", "type", "category", "scope", "position"
        );
        let _ = writeln!(out, "{}", "-".repeat(60));
        for symbol in &self.history {
            let _ = writeln!(
                out,
                "{:<18} {:<12} {:<10} {:<6} L{}:C{}",
                symbol.name,
                symbol.ty.to_string(),
                symbol.category.as_str(),
                symbol.scope_depth,
                symbol.line,
                symbol.column
            );
        }
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, ty: Type) -> Symbol {
        Symbol::value(name, ty, SymbolCategory::Variable, 1, 1)
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        assert!(table.declare(var("x", Type::Int)));
        let symbol = table.lookup("x").unwrap();
        assert_eq!(symbol.ty, Type::Int);
        assert_eq!(symbol.scope_depth, 0);
    }

    #[test]
    fn test_duplicate_in_same_frame_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.declare(var("x", Type::Int)));
        assert!(!table.declare(var("x", Type::Real)));
        assert_eq!(table.lookup("x").unwrap().ty, Type::Int);
    }

    #[test]
    fn test_shadowing_outer_frame_allowed() {
        let mut table = SymbolTable::new();
        table.declare(var("x", Type::Int));
        table.enter_scope();
        assert!(table.declare(var("x", Type::Text)));
        assert_eq!(table.lookup("x").unwrap().ty, Type::Text);
        table.exit_scope();
        assert_eq!(table.lookup("x").unwrap().ty, Type::Int);
    }

    #[test]
    fn test_scope_exit_destroys_symbols() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare(var("local", Type::Bool));
        assert!(table.lookup("local").is_some());
        table.exit_scope();
        assert!(table.lookup("local").is_none());
    }

    #[test]
    fn test_lookup_local_ignores_outer() {
        let mut table = SymbolTable::new();
        table.declare(var("x", Type::Int));
        table.enter_scope();
        assert!(table.lookup_local("x").is_none());
        assert!(table.lookup("x").is_some());
    }

    #[test]
    fn test_lookup_resolves_inner_to_outer() {
        let mut table = SymbolTable::new();
        table.declare(var("global", Type::Int));
        table.enter_scope();
        table.enter_scope();
        let symbol = table.lookup("global").unwrap();
        // A resolved symbol's depth never exceeds the current depth.
        assert!(symbol.scope_depth <= table.depth());
    }

    #[test]
    fn test_global_frame_never_popped() {
        let mut table = SymbolTable::new();
        table.exit_scope();
        table.exit_scope();
        assert!(table.declare(var("x", Type::Int)));
        assert_eq!(table.depth(), 0);
    }

    #[test]
    fn test_initialized_flag_mutable_through_lookup() {
        let mut table = SymbolTable::new();
        table.declare(var("x", Type::Int));
        table.lookup_mut("x").unwrap().initialized = true;
        assert!(table.lookup("x").unwrap().initialized);
    }

    #[test]
    fn test_render_table_lists_history_in_order() {
        let mut table = SymbolTable::new();
        table.declare(var("primeiro", Type::Int));
        table.enter_scope();
        table.declare(var("segundo", Type::Text));
        table.exit_scope();
        let rendered = table.render_table();
        let first = rendered.find("primeiro").unwrap();
        let second = rendered.find("segundo").unwrap();
        assert!(first < second);
        assert!(rendered.contains("texto"));
    }
}

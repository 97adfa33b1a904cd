//! AST node definitions.
//!
//! The tree has two top-level categories, [`Expr`] and [`Stmt`], under a
//! [`Program`] root. Nodes are plain sum types; each parent exclusively
//! owns its children and every node carries the span of its defining
//! token. Traversals are recursive functions matching on the tag - there
//! is no visitor interface.

use std::fmt;

use serde::Serialize;

use lus_util::Span;

/// Root node: the ordered sequence of top-level declarations and
/// statements.
#[derive(Clone, Debug, Serialize)]
pub struct Program {
    pub decls: Vec<Stmt>,
}

/// A literal value, carrying its own kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
}

impl Literal {
    /// Surface name of the literal's type.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_par::Literal;
    ///
    /// assert_eq!(Literal::Int(42).type_name(), "inteiro");
    /// assert_eq!(Literal::Bool(true).type_name(), "logico");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Int(_) => "inteiro",
            Literal::Real(_) => "real",
            Literal::Text(_) => "texto",
            Literal::Bool(_) => "logico",
        }
    }
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    /// Source spelling of the operator.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_par::BinOp;
    ///
    /// assert_eq!(BinOp::Pow.symbol(), "**");
    /// assert_eq!(BinOp::Ne.symbol(), "!=");
    /// ```
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }

    /// True for `+ - * / % **`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem | BinOp::Pow
        )
    }

    /// True for `== != < <= > >=`.
    pub fn is_comparison(&self) -> bool {
        !self.is_arithmetic()
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnOp {
    /// Arithmetic negation, `-x`.
    Neg,
    /// Logical negation, `nao x`.
    Not,
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "nao",
        }
    }
}

/// Short-circuit logical operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOp::And => "e",
            LogicalOp::Or => "ou",
        }
    }
}

/// A type annotation as written in the source.
///
/// # Examples
///
/// ```
/// use lus_par::TypeName;
///
/// assert_eq!(TypeName::Int.to_string(), "inteiro");
/// assert_eq!(TypeName::Void.to_string(), "vazio");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TypeName {
    Int,
    Real,
    Text,
    Bool,
    Void,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeName::Int => "inteiro",
            TypeName::Real => "real",
            TypeName::Text => "texto",
            TypeName::Bool => "logico",
            TypeName::Void => "vazio",
        };
        write!(f, "{}", name)
    }
}

/// Expression nodes.
#[derive(Clone, Debug, Serialize)]
pub enum Expr {
    Literal {
        value: Literal,
        span: Span,
    },
    Variable {
        name: String,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        /// Span of the operator token.
        span: Span,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        span: Span,
    },
    Grouping {
        expr: Box<Expr>,
        span: Span,
    },
    Assign {
        name: String,
        value: Box<Expr>,
        /// Span of the target variable.
        span: Span,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
        span: Span,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
        /// Span of the callee name.
        span: Span,
    },
    /// Bracket indexing, parsed for forward compatibility; the language
    /// has no array type yet.
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// The span of the node's defining token.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_par::Expr;
    /// use lus_util::Span;
    ///
    /// let expr = Expr::Variable {
    ///     name: "soma".to_string(),
    ///     span: Span::point(2, 4),
    /// };
    /// assert_eq!(expr.span().line, 2);
    /// assert_eq!(expr.span().column, 4);
    /// ```
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Variable { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Grouping { span, .. }
            | Expr::Assign { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Call { span, .. }
            | Expr::Index { span, .. } => *span,
        }
    }
}

/// A function parameter.
#[derive(Clone, Debug, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeName,
}

/// A function declaration.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    /// `None` means `vazio`.
    pub return_type: Option<TypeName>,
    /// Statements of the body block.
    pub body: Vec<Stmt>,
}

/// Statement nodes.
#[derive(Clone, Debug, Serialize)]
pub enum Stmt {
    VarDecl {
        name: String,
        declared_type: Option<TypeName>,
        initializer: Option<Expr>,
        is_const: bool,
        /// Span of the variable name.
        span: Span,
    },
    Block {
        stmts: Vec<Stmt>,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// `para <var> de <start> ate <end> [passo <step>]` - the range is
    /// inclusive on both ends.
    For {
        var: String,
        var_span: Span,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    Function(FunctionDecl),
    Return {
        value: Option<Expr>,
        /// Span of the `retorna` keyword.
        span: Span,
    },
    Print {
        args: Vec<Expr>,
    },
    Input {
        var: String,
        var_span: Span,
        prompt: Option<Expr>,
    },
    Expr(Expr),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_type_names() {
        assert_eq!(Literal::Int(1).type_name(), "inteiro");
        assert_eq!(Literal::Real(1.0).type_name(), "real");
        assert_eq!(Literal::Text("a".into()).type_name(), "texto");
        assert_eq!(Literal::Bool(true).type_name(), "logico");
    }

    #[test]
    fn test_binop_symbols() {
        assert_eq!(BinOp::Pow.symbol(), "**");
        assert_eq!(BinOp::Ne.symbol(), "!=");
        assert!(BinOp::Pow.is_arithmetic());
        assert!(BinOp::Le.is_comparison());
    }

    #[test]
    fn test_type_name_display() {
        assert_eq!(TypeName::Int.to_string(), "inteiro");
        assert_eq!(TypeName::Void.to_string(), "vazio");
    }

    #[test]
    fn test_expr_span() {
        let expr = Expr::Variable {
            name: "x".into(),
            span: Span::point(3, 9),
        };
        assert_eq!(expr.span().line, 3);
        assert_eq!(expr.span().column, 9);
    }

    #[test]
    fn test_ast_serializes_to_json() {
        let program = Program {
            decls: vec![Stmt::Expr(Expr::Literal {
                value: Literal::Int(42),
                span: Span::DUMMY,
            })],
        };
        let json = serde_json::to_string(&program).unwrap();
        assert!(json.contains("\"Int\":42"));
    }
}

//! Python code emission.
//!
//! A recursive visit over the AST: expressions return textual fragments,
//! statements append indented lines to the buffer. Precedence is
//! preserved by unconditionally parenthesizing every binary, unary, and
//! logical sub-expression; grouping nodes add one more redundant pair.
//! Four spaces per indentation level.

use lus_par::{Expr, FunctionDecl, Literal, Program, Stmt, TypeName, UnOp};

/// Builtin shim prepended to every emitted program.
const PREAMBLE: &[&str] = &[
    "# -*- coding: utf-8 -*-",
    "\"\"\"Generated by the Lusitano compiler.\"\"\"",
    "",
    "def paraInteiro(valor):",
    "    return int(valor)",
    "",
    "def paraReal(valor):",
    "    return float(valor)",
    "",
    "def paraTexto(valor):",
    "    return str(valor)",
    "",
    "def raiz(x):",
    "    return x ** 0.5",
    "",
    "def absoluto(x):",
    "    return abs(x)",
    "",
    "def arredonda(x):",
    "    return round(x)",
    "",
    "def tamanho(texto):",
    "    return len(texto)",
    "",
];

/// Python emitter.
///
/// Pure function of the AST: the tree must already have passed semantic
/// analysis, and no diagnostics are produced here.
///
/// # Examples
///
/// ```
/// use lus_gen::PyEmitter;
/// use lus_lex::tokenize;
/// use lus_par::Parser;
/// use lus_util::Handler;
///
/// let mut handler = Handler::new();
/// let tokens = tokenize("para i de 1 ate 10 { escreva(i) }").unwrap();
/// let program = Parser::new(tokens, &mut handler).parse();
///
/// let python = PyEmitter::new().emit_program(&program);
/// assert!(python.contains("for i in range(1, 10 + 1):"));
/// ```
pub struct PyEmitter {
    indent: usize,
    lines: Vec<String>,
}

impl PyEmitter {
    pub fn new() -> Self {
        Self {
            indent: 0,
            lines: Vec::new(),
        }
    }

    /// Emits a complete Python program: builtin shim, the translated
    /// declarations, and a guarded `principal()` entry point.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_gen::PyEmitter;
    /// use lus_lex::tokenize;
    /// use lus_par::Parser;
    /// use lus_util::Handler;
    ///
    /// let mut handler = Handler::new();
    /// let tokens = tokenize("funcao nada() { }").unwrap();
    /// let program = Parser::new(tokens, &mut handler).parse();
    ///
    /// let python = PyEmitter::new().emit_program(&program);
    /// assert!(python.contains("def nada():\n    pass"));
    /// assert!(python.contains("def paraInteiro(valor):"));
    /// assert!(python.contains("except NameError:"));
    /// ```
    pub fn emit_program(mut self, program: &Program) -> String {
        for line in PREAMBLE {
            self.lines.push((*line).to_string());
        }

        for stmt in &program.decls {
            self.emit_stmt(stmt);
        }

        self.lines.push(String::new());
        self.lines.push("if __name__ == '__main__':".to_string());
        self.lines.push("    try:".to_string());
        self.lines.push("        principal()".to_string());
        self.lines.push("    except NameError:".to_string());
        self.lines.push("        pass".to_string());

        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn push_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", "    ".repeat(self.indent), line));
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                name,
                declared_type,
                initializer,
                ..
            } => match initializer {
                Some(init) => self.push_line(format!("{} = {}", name, emit_expr(init))),
                None => self.push_line(format!("{} = {}", name, default_value(*declared_type))),
            },
            Stmt::Block { stmts } => {
                // Python has no block scoping; children stay at this level.
                for stmt in stmts {
                    self.emit_stmt(stmt);
                }
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => self.emit_if(cond, then_branch, else_branch.as_deref(), "if"),
            Stmt::While { cond, body } => {
                self.push_line(format!("while {}:", emit_expr(cond)));
                self.emit_suite(body);
            }
            Stmt::For {
                var,
                start,
                end,
                step,
                body,
                ..
            } => {
                // The source range is inclusive on both ends; range() is
                // half-open, hence the mandatory + 1.
                let header = match step {
                    Some(step) => format!(
                        "for {} in range({}, {} + 1, {}):",
                        var,
                        emit_expr(start),
                        emit_expr(end),
                        emit_expr(step)
                    ),
                    None => format!(
                        "for {} in range({}, {} + 1):",
                        var,
                        emit_expr(start),
                        emit_expr(end)
                    ),
                };
                self.push_line(header);
                self.emit_suite(body);
            }
            Stmt::Function(decl) => self.emit_function(decl),
            Stmt::Return { value, .. } => match value {
                Some(value) => self.push_line(format!("return {}", emit_expr(value))),
                None => self.push_line("return"),
            },
            Stmt::Print { args } => {
                if args.is_empty() {
                    self.push_line("print()");
                } else {
                    let args: Vec<_> = args.iter().map(emit_expr).collect();
                    self.push_line(format!("print({}, sep='')", args.join(", ")));
                }
            }
            Stmt::Input { var, prompt, .. } => match prompt {
                Some(prompt) => {
                    self.push_line(format!("{} = input({})", var, emit_expr(prompt)))
                }
                None => self.push_line(format!("{} = input()", var)),
            },
            Stmt::Expr(expr) => {
                // Statement-position assignments use plain `=`; only
                // assignments nested in expressions need the walrus.
                let line = match expr {
                    Expr::Assign { name, value, .. } => {
                        format!("{} = {}", name, emit_expr(value))
                    }
                    _ => emit_expr(expr),
                };
                self.push_line(line);
            }
        }
    }

    /// Emits `if`/`elif`/`else`: a nested `If` in the else branch (the
    /// parse of `senaose`) becomes an `elif` chain.
    fn emit_if(&mut self, cond: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>, keyword: &str) {
        self.push_line(format!("{} {}:", keyword, emit_expr(cond)));
        self.emit_suite(then_branch);

        if let Some(else_branch) = else_branch {
            match else_branch {
                Stmt::If {
                    cond,
                    then_branch,
                    else_branch,
                } => self.emit_if(cond, then_branch, else_branch.as_deref(), "elif"),
                other => {
                    self.push_line("else:");
                    self.emit_suite(other);
                }
            }
        }
    }

    fn emit_function(&mut self, decl: &FunctionDecl) {
        let params: Vec<_> = decl.params.iter().map(|p| p.name.clone()).collect();
        self.push_line(format!("def {}({}):", decl.name, params.join(", ")));

        self.indent += 1;
        let before = self.lines.len();
        for stmt in &decl.body {
            self.emit_stmt(stmt);
        }
        if self.lines.len() == before {
            self.push_line("pass");
        }
        self.indent -= 1;

        self.push_line("");
    }

    /// Emits a statement as an indented suite, producing `pass` when the
    /// statement generates no lines (an empty block).
    fn emit_suite(&mut self, stmt: &Stmt) {
        self.indent += 1;
        let before = self.lines.len();
        self.emit_stmt(stmt);
        if self.lines.len() == before {
            self.push_line("pass");
        }
        self.indent -= 1;
    }
}

impl Default for PyEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits one expression as a Python fragment.
fn emit_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal { value, .. } => emit_literal(value),
        Expr::Variable { name, .. } => name.clone(),
        Expr::Binary {
            left, op, right, ..
        } => format!(
            "({} {} {})",
            emit_expr(left),
            op.symbol(),
            emit_expr(right)
        ),
        Expr::Unary { op, operand, .. } => match op {
            UnOp::Neg => format!("(-{})", emit_expr(operand)),
            UnOp::Not => format!("(not {})", emit_expr(operand)),
        },
        Expr::Grouping { expr, .. } => format!("({})", emit_expr(expr)),
        Expr::Assign { name, value, .. } => format!("({} := {})", name, emit_expr(value)),
        Expr::Logical {
            left, op, right, ..
        } => {
            let keyword = match op {
                lus_par::LogicalOp::And => "and",
                lus_par::LogicalOp::Or => "or",
            };
            format!("({} {} {})", emit_expr(left), keyword, emit_expr(right))
        }
        Expr::Call { callee, args, .. } => {
            let args: Vec<_> = args.iter().map(emit_expr).collect();
            format!("{}({})", callee, args.join(", "))
        }
        Expr::Index { object, index, .. } => {
            format!("{}[{}]", emit_expr(object), emit_expr(index))
        }
    }
}

fn emit_literal(value: &Literal) -> String {
    match value {
        Literal::Int(v) => v.to_string(),
        Literal::Real(v) => emit_real(*v),
        Literal::Text(s) => quote_string(s),
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
    }
}

/// Formats a real literal so Python reads it back as a float: whole
/// values keep a `.0` suffix, everything else uses the shortest form.
fn emit_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Default Python value for an uninitialized declaration.
fn default_value(declared_type: Option<TypeName>) -> &'static str {
    match declared_type {
        Some(TypeName::Int) => "0",
        Some(TypeName::Real) => "0.0",
        Some(TypeName::Text) => "\"\"",
        Some(TypeName::Bool) => "False",
        Some(TypeName::Void) | None => "None",
    }
}

/// Quotes a decoded string back into Python source form, re-applying the
/// standard escapes.
fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

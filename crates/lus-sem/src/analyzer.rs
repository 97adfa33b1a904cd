//! The semantic analyzer.
//!
//! A single post-order pass over the AST that computes a [`Type`] for
//! every expression, maintains the scoped symbol table, and accumulates
//! diagnostics. Expected user-program failures never abort the pass;
//! they are recorded and analysis continues, with `Error` propagating
//! silently so each mistake is reported once.

use lus_par::{Expr, FunctionDecl, Literal, Program, Stmt, UnOp};
use lus_util::{Diagnostic, Handler, Span, Stage};

use crate::symbol::{Symbol, SymbolCategory, SymbolTable};
use crate::types::{binary_result, compatible, Type};

/// Return-checking context for the function being analyzed.
struct FunctionContext {
    name: String,
    return_type: Type,
}

/// Semantic analyzer for a whole program.
pub struct SemanticAnalyzer<'a> {
    /// The scoped symbol table, global frame pre-populated with builtins.
    pub table: SymbolTable,

    /// Shared diagnostic sink.
    handler: &'a mut Handler,

    /// Function whose body is being analyzed, if any.
    current_function: Option<FunctionContext>,

    /// Whether the current path through the function has returned.
    has_return: bool,

    /// Errors produced by this analyzer (the handler may already hold
    /// diagnostics from earlier stages).
    error_count: usize,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Creates an analyzer and registers the builtin functions.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_sem::SemanticAnalyzer;
    /// use lus_util::Handler;
    ///
    /// let mut handler = Handler::new();
    /// let analyzer = SemanticAnalyzer::new(&mut handler);
    /// assert!(analyzer.table.lookup("paraInteiro").is_some());
    /// ```
    pub fn new(handler: &'a mut Handler) -> Self {
        let mut table = SymbolTable::new();
        register_builtins(&mut table);
        Self {
            table,
            handler,
            current_function: None,
            has_return: false,
            error_count: 0,
        }
    }

    /// Analyzes a program. Returns true when no semantic errors were
    /// found; warnings do not affect the verdict.
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_lex::tokenize;
    /// use lus_par::Parser;
    /// use lus_sem::SemanticAnalyzer;
    /// use lus_util::Handler;
    ///
    /// let mut handler = Handler::new();
    /// let tokens = tokenize("funcao principal() { var x: inteiro = \"oi\" }").unwrap();
    /// let program = Parser::new(tokens, &mut handler).parse();
    ///
    /// let mut analyzer = SemanticAnalyzer::new(&mut handler);
    /// assert!(!analyzer.analyze(&program));
    /// assert_eq!(handler.error_count(), 1);
    /// ```
    pub fn analyze(&mut self, program: &Program) -> bool {
        for stmt in &program.decls {
            self.check_stmt(stmt);
        }

        if self.table.lookup("principal").is_none() {
            self.warning("program has no 'principal' function", Span::point(1, 1));
        }

        self.error_count == 0
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.error_count += 1;
        self.handler
            .emit(Diagnostic::error(Stage::Semantic, message, span));
    }

    fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.handler
            .emit(Diagnostic::warning(Stage::Semantic, message, span));
    }

    // Statements

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                name,
                declared_type,
                initializer,
                is_const,
                span,
            } => self.check_var_decl(name, *declared_type, initializer.as_ref(), *is_const, *span),
            Stmt::Block { stmts } => {
                self.table.enter_scope();
                for stmt in stmts {
                    self.check_stmt(stmt);
                }
                self.table.exit_scope();
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => self.check_if(cond, then_branch, else_branch.as_deref()),
            Stmt::While { cond, body } => {
                let cond_ty = self.check_expr(cond);
                if cond_ty != Type::Bool && cond_ty != Type::Error {
                    self.error(
                        format!("'enquanto' condition must be 'logico', found '{}'", cond_ty),
                        cond.span(),
                    );
                }
                self.check_stmt(body);
            }
            Stmt::For {
                var,
                var_span,
                start,
                end,
                step,
                body,
            } => self.check_for(var, *var_span, start, end, step.as_ref(), body),
            Stmt::Function(decl) => self.check_function(decl),
            Stmt::Return { value, span } => self.check_return(value.as_ref(), *span),
            Stmt::Print { args } => {
                for arg in args {
                    self.check_expr(arg);
                }
            }
            Stmt::Input {
                var,
                var_span,
                prompt,
            } => self.check_input(var, *var_span, prompt.as_ref()),
            Stmt::Expr(expr) => {
                self.check_expr(expr);
            }
        }
    }

    fn check_var_decl(
        &mut self,
        name: &str,
        declared_type: Option<lus_par::TypeName>,
        initializer: Option<&Expr>,
        is_const: bool,
        span: Span,
    ) {
        if let Some(existing) = self.table.lookup_local(name) {
            let previous_line = existing.line;
            self.error(
                format!(
                    "'{}' is already declared in this scope (line {})",
                    name, previous_line
                ),
                span,
            );
            return;
        }

        let mut ty = declared_type.map_or(Type::Unknown, Type::from);

        if let Some(init) = initializer {
            let init_ty = self.check_expr(init);
            if ty == Type::Unknown {
                ty = init_ty;
            } else if !compatible(ty, init_ty) {
                self.error(
                    format!("type mismatch: cannot assign '{}' to '{}'", init_ty, ty),
                    span,
                );
            }
        }

        if is_const && initializer.is_none() {
            self.error(
                format!("constant '{}' must be initialized at its declaration", name),
                span,
            );
        }

        let category = if is_const {
            SymbolCategory::Constant
        } else {
            SymbolCategory::Variable
        };
        let mut symbol = Symbol::value(name, ty, category, span.line, span.column);
        symbol.initialized = initializer.is_some();
        self.table.declare(symbol);
    }

    fn check_if(&mut self, cond: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>) {
        let cond_ty = self.check_expr(cond);
        if cond_ty != Type::Bool && cond_ty != Type::Error {
            self.error(
                format!("'se' condition must be 'logico', found '{}'", cond_ty),
                cond.span(),
            );
        }

        // A path returns through the `se` only when both branches do;
        // with a single branch the pre-statement value is kept.
        let before = self.has_return;

        self.check_stmt(then_branch);
        let then_returns = self.has_return;

        match else_branch {
            Some(else_branch) => {
                self.has_return = before;
                self.check_stmt(else_branch);
                let else_returns = self.has_return;
                self.has_return = then_returns && else_returns;
            }
            None => self.has_return = before,
        }
    }

    fn check_for(
        &mut self,
        var: &str,
        var_span: Span,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
        body: &Stmt,
    ) {
        // The loop variable lives in its own frame covering the body.
        self.table.enter_scope();

        let mut symbol = Symbol::value(
            var,
            Type::Int,
            SymbolCategory::Variable,
            var_span.line,
            var_span.column,
        );
        symbol.initialized = true;
        self.table.declare(symbol);

        let start_ty = self.check_expr(start);
        if !start_ty.is_numeric() && start_ty != Type::Error {
            self.error(
                format!("'para' start value must be numeric, found '{}'", start_ty),
                start.span(),
            );
        }

        let end_ty = self.check_expr(end);
        if !end_ty.is_numeric() && end_ty != Type::Error {
            self.error(
                format!("'para' end value must be numeric, found '{}'", end_ty),
                end.span(),
            );
        }

        if let Some(step) = step {
            let step_ty = self.check_expr(step);
            if !step_ty.is_numeric() && step_ty != Type::Error {
                self.error(
                    format!("'para' step must be numeric, found '{}'", step_ty),
                    step.span(),
                );
            }
        }

        self.check_stmt(body);
        self.table.exit_scope();
    }

    fn check_function(&mut self, decl: &FunctionDecl) {
        if let Some(existing) = self.table.lookup_local(&decl.name) {
            let previous_line = existing.line;
            self.error(
                format!(
                    "function '{}' is already declared (line {})",
                    decl.name, previous_line
                ),
                decl.name_span,
            );
            return;
        }

        let return_type = decl.return_type.map_or(Type::Void, Type::from);
        let params: Vec<(String, Type)> = decl
            .params
            .iter()
            .map(|p| (p.name.clone(), Type::from(p.ty)))
            .collect();

        self.table.declare(Symbol::function(
            decl.name.clone(),
            params,
            return_type,
            decl.name_span.line,
            decl.name_span.column,
        ));

        // Parameters are declared in the body frame, before the body.
        self.table.enter_scope();
        let outer_function = self.current_function.replace(FunctionContext {
            name: decl.name.clone(),
            return_type,
        });
        let outer_has_return = self.has_return;
        self.has_return = false;

        for param in &decl.params {
            let mut symbol = Symbol::value(
                &param.name,
                Type::from(param.ty),
                SymbolCategory::Parameter,
                decl.name_span.line,
                decl.name_span.column,
            );
            symbol.initialized = true;
            if !self.table.declare(symbol) {
                self.error(
                    format!(
                        "duplicate parameter '{}' in function '{}'",
                        param.name, decl.name
                    ),
                    decl.name_span,
                );
            }
        }

        for stmt in &decl.body {
            self.check_stmt(stmt);
        }

        if return_type != Type::Void && !self.has_return {
            self.warning(
                format!(
                    "function '{}' should return '{}' but not all paths return",
                    decl.name, return_type
                ),
                decl.name_span,
            );
        }

        self.table.exit_scope();
        self.current_function = outer_function;
        self.has_return = outer_has_return;
    }

    fn check_return(&mut self, value: Option<&Expr>, span: Span) {
        self.has_return = true;

        let (name, expected) = match &self.current_function {
            Some(context) => (context.name.clone(), context.return_type),
            None => {
                self.error("'retorna' outside of a function", span);
                return;
            }
        };

        match value {
            Some(value) => {
                let value_ty = self.check_expr(value);
                if expected == Type::Void {
                    self.error(
                        format!("function '{}' should not return a value", name),
                        span,
                    );
                } else if !compatible(expected, value_ty) {
                    self.error(
                        format!(
                            "incompatible return type: expected '{}', found '{}'",
                            expected, value_ty
                        ),
                        span,
                    );
                }
            }
            None => {
                if expected != Type::Void {
                    self.error(
                        format!("function '{}' should return '{}'", name, expected),
                        span,
                    );
                }
            }
        }
    }

    fn check_input(&mut self, var: &str, var_span: Span, prompt: Option<&Expr>) {
        match self.table.lookup(var).map(|s| s.is_const) {
            None => self.error(format!("variable '{}' is not declared", var), var_span),
            Some(true) => self.error(format!("cannot read into constant '{}'", var), var_span),
            Some(false) => {
                if let Some(symbol) = self.table.lookup_mut(var) {
                    symbol.initialized = true;
                }
            }
        }

        if let Some(prompt) = prompt {
            let prompt_ty = self.check_expr(prompt);
            if prompt_ty != Type::Text && prompt_ty != Type::Error {
                self.error(
                    format!("'leia' prompt must be 'texto', found '{}'", prompt_ty),
                    prompt.span(),
                );
            }
        }
    }

    // Expressions

    /// Computes the type of an expression, reporting problems as it goes.
    fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Literal { value, .. } => match value {
                Literal::Int(_) => Type::Int,
                Literal::Real(_) => Type::Real,
                Literal::Text(_) => Type::Text,
                Literal::Bool(_) => Type::Bool,
            },
            Expr::Variable { name, span } => self.check_variable(name, *span),
            Expr::Binary {
                left,
                op,
                right,
                span,
            } => {
                let lhs = self.check_expr(left);
                let rhs = self.check_expr(right);
                if lhs == Type::Error || rhs == Type::Error {
                    return Type::Error;
                }
                let result = binary_result(lhs, *op, rhs);
                if result == Type::Error {
                    self.error(
                        format!(
                            "operator '{}' cannot be applied to '{}' and '{}'",
                            op.symbol(),
                            lhs,
                            rhs
                        ),
                        *span,
                    );
                }
                result
            }
            Expr::Unary { op, operand, span } => {
                let operand_ty = self.check_expr(operand);
                if operand_ty == Type::Error {
                    return Type::Error;
                }
                match op {
                    UnOp::Neg => {
                        if operand_ty.is_numeric() {
                            operand_ty
                        } else {
                            self.error(
                                format!("operator '-' cannot be applied to '{}'", operand_ty),
                                *span,
                            );
                            Type::Error
                        }
                    }
                    UnOp::Not => {
                        if operand_ty == Type::Bool {
                            Type::Bool
                        } else {
                            self.error(
                                format!(
                                    "operator 'nao' can only be applied to 'logico', found '{}'",
                                    operand_ty
                                ),
                                *span,
                            );
                            Type::Error
                        }
                    }
                }
            }
            Expr::Grouping { expr, .. } => self.check_expr(expr),
            Expr::Assign { name, value, span } => self.check_assign(name, value, *span),
            Expr::Logical {
                left,
                op,
                right,
                span,
            } => {
                let lhs = self.check_expr(left);
                let rhs = self.check_expr(right);
                if lhs == Type::Error || rhs == Type::Error {
                    return Type::Error;
                }
                let mut failed = false;
                if lhs != Type::Bool {
                    self.error(
                        format!(
                            "operator '{}' requires a 'logico' left operand, found '{}'",
                            op.symbol(),
                            lhs
                        ),
                        *span,
                    );
                    failed = true;
                }
                if rhs != Type::Bool {
                    self.error(
                        format!(
                            "operator '{}' requires a 'logico' right operand, found '{}'",
                            op.symbol(),
                            rhs
                        ),
                        *span,
                    );
                    failed = true;
                }
                if failed {
                    Type::Error
                } else {
                    Type::Bool
                }
            }
            Expr::Call { callee, args, span } => self.check_call(callee, args, *span),
            Expr::Index { object, index, span } => {
                self.check_expr(object);
                let index_ty = self.check_expr(index);
                if index_ty != Type::Int && index_ty != Type::Error {
                    self.error(
                        format!("array index must be 'inteiro', found '{}'", index_ty),
                        *span,
                    );
                }
                // No array types yet: the element type is unknowable.
                Type::Unknown
            }
        }
    }

    fn check_variable(&mut self, name: &str, span: Span) -> Type {
        let info = self
            .table
            .lookup(name)
            .map(|s| (s.ty, s.initialized, s.category));

        match info {
            None => {
                self.error(format!("variable '{}' is not declared", name), span);
                Type::Error
            }
            Some((ty, initialized, category)) => {
                if !initialized && category == SymbolCategory::Variable {
                    self.warning(format!("variable '{}' may not be initialized", name), span);
                }
                ty
            }
        }
    }

    fn check_assign(&mut self, name: &str, value: &Expr, span: Span) -> Type {
        let info = self.table.lookup(name).map(|s| (s.ty, s.is_const));

        let Some((symbol_ty, is_const)) = info else {
            self.error(format!("variable '{}' is not declared", name), span);
            return Type::Error;
        };

        if is_const {
            self.error(format!("cannot assign to constant '{}'", name), span);
        }

        let value_ty = self.check_expr(value);
        if !compatible(symbol_ty, value_ty) {
            self.error(
                format!(
                    "type mismatch: cannot assign '{}' to '{}'",
                    value_ty, symbol_ty
                ),
                span,
            );
        }

        if let Some(symbol) = self.table.lookup_mut(name) {
            symbol.initialized = true;
        }

        symbol_ty
    }

    fn check_call(&mut self, callee: &str, args: &[Expr], span: Span) -> Type {
        let info = self
            .table
            .lookup(callee)
            .map(|s| (s.ty, s.params.clone(), s.return_type));

        let Some((ty, params, return_type)) = info else {
            self.error(format!("function '{}' is not declared", callee), span);
            return Type::Error;
        };

        if ty != Type::Function {
            self.error(format!("'{}' is not a function", callee), span);
            return Type::Error;
        }

        if args.len() != params.len() {
            self.error(
                format!(
                    "function '{}' expects {} argument(s), found {}",
                    callee,
                    params.len(),
                    args.len()
                ),
                span,
            );
        }

        for (i, (arg, (_, param_ty))) in args.iter().zip(params.iter()).enumerate() {
            let arg_ty = self.check_expr(arg);
            if !compatible(*param_ty, arg_ty) {
                self.error(
                    format!(
                        "argument {} of '{}': expected '{}', found '{}'",
                        i + 1,
                        callee,
                        param_ty,
                        arg_ty
                    ),
                    arg.span(),
                );
            }
        }

        return_type.unwrap_or(Type::Void)
    }
}

/// Pre-declares the builtin functions in the global frame.
///
/// The conversion builtins take one `Unknown` parameter, which the
/// compatibility predicate accepts for any argument type.
fn register_builtins(table: &mut SymbolTable) {
    for (name, return_type) in [
        ("paraInteiro", Type::Int),
        ("paraReal", Type::Real),
        ("paraTexto", Type::Text),
    ] {
        table.declare(Symbol::function(
            name,
            vec![("valor".to_string(), Type::Unknown)],
            return_type,
            0,
            0,
        ));
    }

    for name in ["raiz", "absoluto", "arredonda"] {
        table.declare(Symbol::function(
            name,
            vec![("x".to_string(), Type::Real)],
            Type::Real,
            0,
            0,
        ));
    }

    table.declare(Symbol::function(
        "tamanho",
        vec![("texto".to_string(), Type::Text)],
        Type::Int,
        0,
        0,
    ));
}

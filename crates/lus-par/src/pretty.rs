//! Debug tree printer for the AST.
//!
//! Statements render as a box-drawing tree; expressions render inline in
//! their source-like form. Used by the driver's `--ast` flag.

use crate::ast::{Expr, FunctionDecl, Literal, Program, Stmt};

/// Renders a program as an indented tree.
///
/// # Examples
///
/// ```
/// use lus_lex::tokenize;
/// use lus_par::{render_ast, Parser};
/// use lus_util::Handler;
///
/// let mut handler = Handler::new();
/// let tokens = tokenize("funcao dobro(n: inteiro): inteiro { retorna n * 2 }").unwrap();
/// let program = Parser::new(tokens, &mut handler).parse();
///
/// let tree = render_ast(&program);
/// assert!(tree.starts_with("Program"));
/// assert!(tree.contains("Function dobro(n: inteiro): inteiro"));
/// assert!(tree.contains("Return (n * 2)"));
/// ```
pub fn render(program: &Program) -> String {
    let mut out = String::from("Program\n");
    let count = program.decls.len();
    for (i, stmt) in program.decls.iter().enumerate() {
        render_stmt(stmt, "", i + 1 == count, &mut out);
    }
    out
}

fn render_stmt(stmt: &Stmt, prefix: &str, last: bool, out: &mut String) {
    let connector = if last { "└── " } else { "├── " };
    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });

    match stmt {
        Stmt::VarDecl {
            name,
            declared_type,
            initializer,
            is_const,
            ..
        } => {
            let keyword = if *is_const { "Const" } else { "Var" };
            let ty = declared_type.map_or("<inferred>".to_string(), |t| t.to_string());
            match initializer {
                Some(init) => out.push_str(&format!(
                    "{}{}{} {}: {} = {}\n",
                    prefix,
                    connector,
                    keyword,
                    name,
                    ty,
                    fmt_expr(init)
                )),
                None => out.push_str(&format!(
                    "{}{}{} {}: {}\n",
                    prefix, connector, keyword, name, ty
                )),
            }
        }
        Stmt::Block { stmts } => {
            out.push_str(&format!("{}{}Block\n", prefix, connector));
            render_stmt_list(stmts, &child_prefix, out);
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str(&format!("{}{}If {}\n", prefix, connector, fmt_expr(cond)));
            render_stmt(then_branch, &child_prefix, else_branch.is_none(), out);
            if let Some(else_branch) = else_branch {
                render_stmt(else_branch, &child_prefix, true, out);
            }
        }
        Stmt::While { cond, body } => {
            out.push_str(&format!(
                "{}{}While {}\n",
                prefix,
                connector,
                fmt_expr(cond)
            ));
            render_stmt(body, &child_prefix, true, out);
        }
        Stmt::For {
            var,
            start,
            end,
            step,
            body,
            ..
        } => {
            let step_text = step
                .as_ref()
                .map_or(String::new(), |s| format!(" step {}", fmt_expr(s)));
            out.push_str(&format!(
                "{}{}For {} from {} to {}{}\n",
                prefix,
                connector,
                var,
                fmt_expr(start),
                fmt_expr(end),
                step_text
            ));
            render_stmt(body, &child_prefix, true, out);
        }
        Stmt::Function(decl) => {
            out.push_str(&format!(
                "{}{}Function {}\n",
                prefix,
                connector,
                fmt_signature(decl)
            ));
            render_stmt_list(&decl.body, &child_prefix, out);
        }
        Stmt::Return { value, .. } => match value {
            Some(value) => out.push_str(&format!(
                "{}{}Return {}\n",
                prefix,
                connector,
                fmt_expr(value)
            )),
            None => out.push_str(&format!("{}{}Return\n", prefix, connector)),
        },
        Stmt::Print { args } => {
            let args: Vec<_> = args.iter().map(fmt_expr).collect();
            out.push_str(&format!(
                "{}{}Print({})\n",
                prefix,
                connector,
                args.join(", ")
            ));
        }
        Stmt::Input { var, prompt, .. } => match prompt {
            Some(prompt) => out.push_str(&format!(
                "{}{}Input({}, {})\n",
                prefix,
                connector,
                fmt_expr(prompt),
                var
            )),
            None => out.push_str(&format!("{}{}Input({})\n", prefix, connector, var)),
        },
        Stmt::Expr(expr) => {
            out.push_str(&format!("{}{}Expr {}\n", prefix, connector, fmt_expr(expr)));
        }
    }
}

fn render_stmt_list(stmts: &[Stmt], prefix: &str, out: &mut String) {
    let count = stmts.len();
    for (i, stmt) in stmts.iter().enumerate() {
        render_stmt(stmt, prefix, i + 1 == count, out);
    }
}

fn fmt_signature(decl: &FunctionDecl) -> String {
    let params: Vec<_> = decl
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect();
    match decl.return_type {
        Some(ty) => format!("{}({}): {}", decl.name, params.join(", "), ty),
        None => format!("{}({})", decl.name, params.join(", ")),
    }
}

/// Renders an expression inline, close to its source spelling.
fn fmt_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal { value, .. } => match value {
            Literal::Int(v) => v.to_string(),
            Literal::Real(v) => v.to_string(),
            Literal::Text(s) => format!("{:?}", s),
            Literal::Bool(true) => "verdadeiro".to_string(),
            Literal::Bool(false) => "falso".to_string(),
        },
        Expr::Variable { name, .. } => name.clone(),
        Expr::Binary {
            left, op, right, ..
        } => format!("({} {} {})", fmt_expr(left), op.symbol(), fmt_expr(right)),
        Expr::Unary { op, operand, .. } => {
            format!("({} {})", op.symbol(), fmt_expr(operand))
        }
        Expr::Grouping { expr, .. } => format!("({})", fmt_expr(expr)),
        Expr::Assign { name, value, .. } => format!("{} = {}", name, fmt_expr(value)),
        Expr::Logical {
            left, op, right, ..
        } => format!("({} {} {})", fmt_expr(left), op.symbol(), fmt_expr(right)),
        Expr::Call { callee, args, .. } => {
            let args: Vec<_> = args.iter().map(fmt_expr).collect();
            format!("{}({})", callee, args.join(", "))
        }
        Expr::Index { object, index, .. } => {
            format!("{}[{}]", fmt_expr(object), fmt_expr(index))
        }
    }
}

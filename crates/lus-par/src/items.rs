//! Declaration parsing: functions, variables, and type annotations.

use lus_lex::TokenKind;

use crate::ast::{FunctionDecl, Param, Stmt, TypeName};
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// Parses one top-level or block-level declaration.
    ///
    /// A trailing `;` after any declaration is consumed and ignored, so
    /// `para i de 1 ate 10 { ... }; escreva(s)` parses cleanly.
    pub(crate) fn declaration(&mut self) -> PResult<Stmt> {
        let stmt = if self.matches(&[TokenKind::Function]) {
            self.function_decl()?
        } else if self.matches(&[TokenKind::Var]) {
            self.var_decl(false)?
        } else if self.matches(&[TokenKind::Const]) {
            self.var_decl(true)?
        } else {
            self.statement()?
        };
        self.matches(&[TokenKind::Semi]);
        Ok(stmt)
    }

    /// Parses a function declaration; the `funcao` keyword has already
    /// been consumed.
    fn function_decl(&mut self) -> PResult<Stmt> {
        let name_token = self.consume(TokenKind::Identifier, "expected function name after 'funcao'")?;
        self.consume(TokenKind::LParen, "expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let param_name =
                    self.consume(TokenKind::Identifier, "expected parameter name")?;
                self.consume(TokenKind::Colon, "expected ':' after parameter name")?;
                let ty = self.type_name()?;
                params.push(Param {
                    name: param_name.lexeme,
                    ty,
                });

                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after parameters")?;

        let mut return_type = None;
        if self.matches(&[TokenKind::Colon]) {
            return_type = Some(self.type_name()?);
        }

        self.consume(TokenKind::LBrace, "expected '{' before function body")?;
        let body = self.block_stmts()?;

        Ok(Stmt::Function(FunctionDecl {
            name: name_token.lexeme,
            name_span: name_token.span,
            params,
            return_type,
            body,
        }))
    }

    /// Parses a `var`/`const` declaration; the keyword has already been
    /// consumed.
    fn var_decl(&mut self, is_const: bool) -> PResult<Stmt> {
        let name_token = self.consume(TokenKind::Identifier, "expected variable name")?;

        let mut declared_type = None;
        if self.matches(&[TokenKind::Colon]) {
            declared_type = Some(self.type_name()?);
        }

        let mut initializer = None;
        if self.matches(&[TokenKind::Assign]) {
            initializer = Some(self.expression()?);
        }

        self.matches(&[TokenKind::Semi]);

        Ok(Stmt::VarDecl {
            name: name_token.lexeme,
            declared_type,
            initializer,
            is_const,
            span: name_token.span,
        })
    }

    /// Parses a type annotation.
    pub(crate) fn type_name(&mut self) -> PResult<TypeName> {
        if self.matches(&[TokenKind::TypeInt]) {
            return Ok(TypeName::Int);
        }
        if self.matches(&[TokenKind::TypeReal]) {
            return Ok(TypeName::Real);
        }
        if self.matches(&[TokenKind::TypeText]) {
            return Ok(TypeName::Text);
        }
        if self.matches(&[TokenKind::TypeBool]) {
            return Ok(TypeName::Bool);
        }
        if self.matches(&[TokenKind::TypeVoid]) {
            return Ok(TypeName::Void);
        }
        Err(self.error("expected type name ('inteiro', 'real', 'texto', 'logico' or 'vazio')"))
    }
}

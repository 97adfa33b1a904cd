//! Expression parsing.
//!
//! Classic recursive descent, one function per precedence level (lowest
//! to highest): assignment, `ou`, `e`, equality, comparison, term,
//! factor, power (right-associative), unary, call, primary.

use lus_lex::{LiteralValue, TokenKind};

use crate::ast::{BinOp, Expr, Literal, LogicalOp, UnOp};
use crate::error::ParseError;
use crate::{PResult, Parser};

/// Maximum number of call arguments.
const MAX_CALL_ARGS: usize = 255;

/// Maps a compound-assignment token to the operator it lowers to.
fn compound_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::PlusEq => Some(BinOp::Add),
        TokenKind::MinusEq => Some(BinOp::Sub),
        TokenKind::StarEq => Some(BinOp::Mul),
        TokenKind::SlashEq => Some(BinOp::Div),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Parses one expression.
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        self.assignment()
    }

    /// Parses an assignment, lowering compound forms at parse time:
    /// `x += e` becomes `x = x + e`, with the original operator token's
    /// span kept on the synthesized binary node.
    fn assignment(&mut self) -> PResult<Expr> {
        let expr = self.logical_or()?;

        if self.matches(&[
            TokenKind::Assign,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
        ]) {
            let op_token = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable { name, span } => {
                    let value = match compound_op(op_token.kind) {
                        Some(op) => Expr::Binary {
                            left: Box::new(Expr::Variable {
                                name: name.clone(),
                                span,
                            }),
                            op,
                            right: Box::new(value),
                            span: op_token.span,
                        },
                        None => value,
                    };
                    Ok(Expr::Assign {
                        name,
                        value: Box::new(value),
                        span,
                    })
                }
                _ => Err(ParseError::new("invalid assignment target", op_token)),
            };
        }

        Ok(expr)
    }

    fn logical_or(&mut self) -> PResult<Expr> {
        let mut expr = self.logical_and()?;

        while self.matches(&[TokenKind::Or]) {
            let span = self.previous().span;
            let right = self.logical_and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                op: LogicalOp::Or,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> PResult<Expr> {
        let mut expr = self.equality()?;

        while self.matches(&[TokenKind::And]) {
            let span = self.previous().span;
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                op: LogicalOp::And,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> PResult<Expr> {
        let mut expr = self.comparison()?;

        while self.matches(&[TokenKind::Eq, TokenKind::Ne]) {
            let op = if self.previous().kind == TokenKind::Eq {
                BinOp::Eq
            } else {
                BinOp::Ne
            };
            let span = self.previous().span;
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> PResult<Expr> {
        let mut expr = self.term()?;

        while self.matches(&[TokenKind::Lt, TokenKind::Le, TokenKind::Gt, TokenKind::Ge]) {
            let op = match self.previous().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                _ => BinOp::Ge,
            };
            let span = self.previous().span;
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut expr = self.factor()?;

        while self.matches(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = if self.previous().kind == TokenKind::Plus {
                BinOp::Add
            } else {
                BinOp::Sub
            };
            let span = self.previous().span;
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> PResult<Expr> {
        let mut expr = self.power()?;

        while self.matches(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent]) {
            let op = match self.previous().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => BinOp::Rem,
            };
            let span = self.previous().span;
            let right = self.power()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// `**` is right-associative: `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
    fn power(&mut self) -> PResult<Expr> {
        let expr = self.unary()?;

        if self.matches(&[TokenKind::Power]) {
            let span = self.previous().span;
            let right = self.power()?;
            return Ok(Expr::Binary {
                left: Box::new(expr),
                op: BinOp::Pow,
                right: Box::new(right),
                span,
            });
        }

        Ok(expr)
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.matches(&[TokenKind::Not, TokenKind::Minus]) {
            let op = if self.previous().kind == TokenKind::Not {
                UnOp::Not
            } else {
                UnOp::Neg
            };
            let span = self.previous().span;
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                span,
            });
        }

        self.call()
    }

    /// Parses call and index suffixes: `f(a)(b)`, `o[i][j]`, `f(a)[i]`.
    fn call(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.matches(&[TokenKind::LParen]) {
                expr = self.finish_call(expr)?;
            } else if self.matches(&[TokenKind::LBrack]) {
                let span = self.previous().span;
                let index = self.expression()?;
                self.consume(TokenKind::RBrack, "expected ']' after index")?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses the argument list of a call; the `(` has been consumed.
    /// Only named functions are callable.
    fn finish_call(&mut self, callee: Expr) -> PResult<Expr> {
        let mut args = Vec::new();

        if !self.check(TokenKind::RParen) {
            args.push(self.expression()?);
            while self.matches(&[TokenKind::Comma]) {
                if args.len() >= MAX_CALL_ARGS {
                    return Err(self.error("a call cannot have more than 255 arguments"));
                }
                args.push(self.expression()?);
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after arguments")?;

        match callee {
            Expr::Variable { name, span } => Ok(Expr::Call {
                callee: name,
                args,
                span,
            }),
            _ => Err(self.error("expression is not callable")),
        }
    }

    fn primary(&mut self) -> PResult<Expr> {
        if self.matches(&[
            TokenKind::IntLiteral,
            TokenKind::RealLiteral,
            TokenKind::TextLiteral,
            TokenKind::True,
            TokenKind::False,
        ]) {
            let token = self.previous().clone();
            let value = match token.value.clone() {
                LiteralValue::Int(v) => Literal::Int(v),
                LiteralValue::Real(v) => Literal::Real(v),
                LiteralValue::Text(s) => Literal::Text(s),
                LiteralValue::Bool(b) => Literal::Bool(b),
                LiteralValue::None => {
                    return Err(ParseError::new("literal token without a value", token))
                }
            };
            return Ok(Expr::Literal {
                value,
                span: token.span,
            });
        }

        if self.matches(&[TokenKind::Identifier]) {
            let token = self.previous();
            return Ok(Expr::Variable {
                name: token.lexeme.clone(),
                span: token.span,
            });
        }

        if self.matches(&[TokenKind::LParen]) {
            let span = self.previous().span;
            let expr = self.expression()?;
            self.consume(TokenKind::RParen, "expected ')' after expression")?;
            return Ok(Expr::Grouping {
                expr: Box::new(expr),
                span,
            });
        }

        Err(self.error("expected expression"))
    }
}

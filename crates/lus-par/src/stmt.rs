//! Statement parsing.

use lus_lex::TokenKind;

use crate::ast::Stmt;
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// Parses one statement.
    pub(crate) fn statement(&mut self) -> PResult<Stmt> {
        if self.matches(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.matches(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.matches(&[TokenKind::For]) {
            return self.for_statement();
        }
        if self.matches(&[TokenKind::Print]) {
            return self.print_statement();
        }
        if self.matches(&[TokenKind::Input]) {
            return self.input_statement();
        }
        if self.matches(&[TokenKind::Return]) {
            return self.return_statement();
        }
        if self.matches(&[TokenKind::LBrace]) {
            return Ok(Stmt::Block {
                stmts: self.block_stmts()?,
            });
        }
        self.expr_statement()
    }

    /// Parses `se (cond) stmt [senao stmt | senaose if]`; `se` has been
    /// consumed. `senaose` nests as an `If` in the else branch.
    fn if_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "expected '(' after 'se'")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;

        let then_branch = Box::new(self.statement()?);

        let mut else_branch = None;
        if self.matches(&[TokenKind::Else]) {
            else_branch = Some(Box::new(self.statement()?));
        } else if self.matches(&[TokenKind::ElseIf]) {
            else_branch = Some(Box::new(self.if_statement()?));
        }

        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    /// Parses `enquanto (cond) stmt`; `enquanto` has been consumed.
    fn while_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "expected '(' after 'enquanto'")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While { cond, body })
    }

    /// Parses `para <var> de <start> ate <end> [passo <step>] stmt`;
    /// `para` has been consumed.
    fn for_statement(&mut self) -> PResult<Stmt> {
        let var_token = self.consume(TokenKind::Identifier, "expected loop variable after 'para'")?;
        self.consume(TokenKind::From, "expected 'de' after loop variable")?;
        let start = self.expression()?;
        self.consume(TokenKind::To, "expected 'ate' after start value")?;
        let end = self.expression()?;

        let mut step = None;
        if self.matches(&[TokenKind::Step]) {
            step = Some(self.expression()?);
        }

        let body = Box::new(self.statement()?);

        Ok(Stmt::For {
            var: var_token.lexeme,
            var_span: var_token.span,
            start,
            end,
            step,
            body,
        })
    }

    /// Parses `escreva(e1, ..., en)`; `escreva` has been consumed.
    fn print_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "expected '(' after 'escreva'")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            args.push(self.expression()?);
            while self.matches(&[TokenKind::Comma]) {
                args.push(self.expression()?);
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after arguments")?;
        self.matches(&[TokenKind::Semi]);

        Ok(Stmt::Print { args })
    }

    /// Parses `leia([prompt,] var)`; `leia` has been consumed.
    fn input_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "expected '(' after 'leia'")?;

        let mut prompt = None;
        if self.check(TokenKind::TextLiteral) {
            prompt = Some(self.expression()?);
            self.consume(TokenKind::Comma, "expected ',' after prompt")?;
        }

        let var_token = self.consume(TokenKind::Identifier, "expected variable name to read into")?;
        self.consume(TokenKind::RParen, "expected ')' after variable")?;
        self.matches(&[TokenKind::Semi]);

        Ok(Stmt::Input {
            var: var_token.lexeme,
            var_span: var_token.span,
            prompt,
        })
    }

    /// Parses `retorna [expr]`; `retorna` has been consumed.
    fn return_statement(&mut self) -> PResult<Stmt> {
        let keyword_span = self.previous().span;

        let mut value = None;
        if !self.check(TokenKind::Semi) && !self.check(TokenKind::RBrace) && !self.is_at_end() {
            value = Some(self.expression()?);
        }

        self.matches(&[TokenKind::Semi]);

        Ok(Stmt::Return {
            value,
            span: keyword_span,
        })
    }

    /// Parses the statements of a block; the `{` has been consumed.
    ///
    /// Errors inside the block are reported and recovered from locally,
    /// so a bad statement does not abandon the rest of the block.
    pub(crate) fn block_stmts(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration_or_recover() {
                stmts.push(stmt);
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' to close block")?;
        Ok(stmts)
    }

    /// Parses an expression used as a statement.
    fn expr_statement(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.matches(&[TokenKind::Semi]);
        Ok(Stmt::Expr(expr))
    }
}

#[cfg(test)]
mod tests {
    use lus_lex::tokenize;
    use lus_util::Handler;

    use crate::ast::Stmt;
    use crate::Parser;

    fn parse_one(source: &str) -> Stmt {
        let mut handler = Handler::new();
        let tokens = tokenize(source).unwrap();
        let mut program = Parser::new(tokens, &mut handler).parse();
        assert!(!handler.has_errors(), "unexpected errors: {}", handler.render_all());
        assert_eq!(program.decls.len(), 1);
        program.decls.remove(0)
    }

    #[test]
    fn test_if_else() {
        match parse_one("se (x > 0) { escreva(1) } senao { escreva(2) }") {
            Stmt::If { else_branch, .. } => assert!(else_branch.is_some()),
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        match parse_one("se (x > 0) escreva(1)") {
            Stmt::If { else_branch, .. } => assert!(else_branch.is_none()),
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_senaose_nests_as_if() {
        match parse_one("se (a) { } senaose (b) { } senao { }") {
            Stmt::If { else_branch, .. } => {
                let else_branch = else_branch.expect("else branch");
                match *else_branch {
                    Stmt::If {
                        else_branch: ref inner_else,
                        ..
                    } => assert!(inner_else.is_some()),
                    ref other => panic!("expected nested if, got {:?}", other),
                }
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_while() {
        match parse_one("enquanto (n > 0) { n = n - 1 }") {
            Stmt::While { .. } => {}
            other => panic!("expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_for_without_step() {
        match parse_one("para i de 1 ate 10 { escreva(i) }") {
            Stmt::For { var, step, .. } => {
                assert_eq!(var, "i");
                assert!(step.is_none());
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_step() {
        match parse_one("para i de 0 ate 100 passo 10 { }") {
            Stmt::For { step, .. } => assert!(step.is_some()),
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_print_multiple_args() {
        match parse_one("escreva(\"soma: \", a + b, \"!\")") {
            Stmt::Print { args } => assert_eq!(args.len(), 3),
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_print_no_args() {
        match parse_one("escreva()") {
            Stmt::Print { args } => assert!(args.is_empty()),
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_input_with_prompt() {
        match parse_one("leia(\"Nome: \", nome)") {
            Stmt::Input { var, prompt, .. } => {
                assert_eq!(var, "nome");
                assert!(prompt.is_some());
            }
            other => panic!("expected input, got {:?}", other),
        }
    }

    #[test]
    fn test_input_without_prompt() {
        match parse_one("leia(valor)") {
            Stmt::Input { var, prompt, .. } => {
                assert_eq!(var, "valor");
                assert!(prompt.is_none());
            }
            other => panic!("expected input, got {:?}", other),
        }
    }

    #[test]
    fn test_return_with_and_without_value() {
        match parse_one("retorna 42") {
            Stmt::Return { value, .. } => assert!(value.is_some()),
            other => panic!("expected return, got {:?}", other),
        }
        match parse_one("retorna") {
            Stmt::Return { value, .. } => assert!(value.is_none()),
            other => panic!("expected return, got {:?}", other),
        }
    }

    #[test]
    fn test_return_before_brace_has_no_value() {
        match parse_one("funcao f() { retorna }") {
            Stmt::Function(decl) => match &decl.body[0] {
                Stmt::Return { value, .. } => assert!(value.is_none()),
                other => panic!("expected return, got {:?}", other),
            },
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_blocks() {
        match parse_one("{ var a = 1 { var b = 2 } }") {
            Stmt::Block { stmts } => {
                assert_eq!(stmts.len(), 2);
                assert!(matches!(stmts[1], Stmt::Block { .. }));
            }
            other => panic!("expected block, got {:?}", other),
        }
    }
}

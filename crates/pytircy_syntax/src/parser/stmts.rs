/// Statement parsing methods.
///
/// This chunk parses compound statements (`if`, `while`, `for`, `def`), simple statements (assignments, `return`,
/// imports, `pass`/`break`/`continue`, expression statements) and indentation-based suites.
///
/// ## Notes
/// - Block parsing relies on `Indent` / `Dedent` layout tokens produced by the lexer.
/// - Simple statements may share a line when separated by `;`.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Spanned<Stmt>, CompileError> {
        let start = self.current_span().start;

        let stmt = if self.check_keyword(KeywordId::If) {
            self.advance();
            self.if_tail()?
        } else if self.check_keyword(KeywordId::While) {
            self.while_stmt()?
        } else if self.check_keyword(KeywordId::For) {
            self.for_stmt()?
        } else if self.check_keyword(KeywordId::Def) {
            self.function_def()?
        } else if self.check_indent() {
            return Err(CompileError::syntax("Unexpected indent".to_string(), self.current_span()));
        } else {
            let stmt = self.simple_statement()?;
            self.end_simple_statement()?;
            return Ok(stmt);
        };

        Ok(Spanned::new(stmt, Span::new(start, self.previous_end())))
    }

    /// Parse the statements of an indented block, up to (not including) its DEDENT.
    fn block(&mut self) -> Result<Vec<Spanned<Stmt>>, CompileError> {
        let mut stmts = Vec::new();
        self.skip_newlines();
        while !self.check_dedent() && !self.is_at_end() {
            stmts.push(self.statement()?);
            self.skip_newlines();
        }
        Ok(stmts)
    }

    /// Parse the body after a compound statement's `:`.
    ///
    /// Either an indented block on the following lines, or one or more `;`-separated simple statements on the same
    /// line (`if x: y = 1`).
    fn suite(&mut self, context: &str) -> Result<Vec<Spanned<Stmt>>, CompileError> {
        if self.check_newline() {
            self.advance();
            self.skip_newlines();
            if !self.check_indent() {
                return Err(self.error_here(&format!("Expected an indented block after {}", context)));
            }
            self.advance();
            let body = self.block()?;
            if self.check_dedent() {
                self.advance();
            }
            return Ok(body);
        }

        let mut body = Vec::new();
        loop {
            body.push(self.simple_statement()?);
            if !self.end_simple_statement()? {
                break;
            }
        }
        Ok(body)
    }

    /// Consume the terminator of a simple statement.
    ///
    /// Returns `true` when a `;` was consumed and another statement follows on the same line.
    fn end_simple_statement(&mut self) -> Result<bool, CompileError> {
        if self.match_punct(PunctuationId::Semicolon) {
            if self.check_newline() {
                self.advance();
                return Ok(false);
            }
            return Ok(!self.check_dedent() && !self.is_at_end());
        }
        if self.check_newline() {
            self.advance();
            return Ok(false);
        }
        if self.check_dedent() || self.is_at_end() {
            return Ok(false);
        }
        Err(self.error_here("Expected newline after statement"))
    }

    /// Parse everything after `if` / `elif`. An `elif` becomes a nested `If` in `orelse`.
    fn if_tail(&mut self) -> Result<Stmt, CompileError> {
        let test = self.expression()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' after if condition")?;
        let body = self.suite("'if' statement")?;

        let orelse = if self.check_keyword(KeywordId::Elif) {
            let start = self.current_span().start;
            self.advance();
            let nested = self.if_tail()?;
            vec![Spanned::new(nested, Span::new(start, self.previous_end()))]
        } else if self.match_keyword(KeywordId::Else) {
            self.expect_punct(PunctuationId::Colon, "Expected ':' after else")?;
            self.suite("'else' clause")?
        } else {
            Vec::new()
        };

        Ok(Stmt::If(IfStmt { test, body, orelse }))
    }

    fn while_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect_keyword(KeywordId::While, "Expected 'while'")?;
        let test = self.expression()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' after while condition")?;
        let body = self.suite("'while' statement")?;
        Ok(Stmt::While(WhileStmt { test, body }))
    }

    fn for_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect_keyword(KeywordId::For, "Expected 'for'")?;
        let target = self.target_list()?;
        self.validate_target(&target)?;
        self.expect_keyword(KeywordId::In, "Expected 'in' after for target")?;
        let iter = self.expression_list()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' after for iterable")?;
        let body = self.suite("'for' statement")?;
        Ok(Stmt::For(ForStmt { target, iter, body }))
    }

    fn function_def(&mut self) -> Result<Stmt, CompileError> {
        self.expect_keyword(KeywordId::Def, "Expected 'def'")?;
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LParen, "Expected '(' after function name")?;

        let mut params = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            params.push(self.param()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' after parameters")?;

        let returns = if self.match_punct(PunctuationId::Arrow) {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect_punct(PunctuationId::Colon, "Expected ':' after function signature")?;
        let body = self.suite("function definition")?;

        Ok(Stmt::FunctionDef(FunctionDef {
            name,
            params,
            returns,
            body,
        }))
    }

    fn param(&mut self) -> Result<Spanned<Param>, CompileError> {
        let start = self.current_span().start;
        if self.check_op(OperatorId::Star) || self.check_op(OperatorId::StarStar) || self.check_op(OperatorId::Slash) {
            return Err(CompileError::syntax(
                "Variadic and positional-only parameters are not supported".to_string(),
                self.current_span(),
            ));
        }
        let name = self.identifier()?;
        let annotation = if self.match_punct(PunctuationId::Colon) {
            Some(self.expression()?)
        } else {
            None
        };
        if self.check_op(OperatorId::Eq) {
            return Err(CompileError::syntax(
                format!("Default value for parameter '{}' is not supported", name),
                self.current_span(),
            )
            .with_hint("Remove the default and pass the argument explicitly at every call site"));
        }
        Ok(Spanned::new(
            Param { name, annotation },
            Span::new(start, self.previous_end()),
        ))
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    /// Parse one simple statement without its terminator.
    fn simple_statement(&mut self) -> Result<Spanned<Stmt>, CompileError> {
        let start = self.current_span().start;

        let stmt = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Return) => {
                self.advance();
                if self.peek().kind.is_statement_end() {
                    Stmt::Return(None)
                } else {
                    Stmt::Return(Some(self.expression_list()?))
                }
            }
            TokenKind::Keyword(KeywordId::Pass) => {
                self.advance();
                Stmt::Pass
            }
            TokenKind::Keyword(KeywordId::Break) => {
                self.advance();
                Stmt::Break
            }
            TokenKind::Keyword(KeywordId::Continue) => {
                self.advance();
                Stmt::Continue
            }
            TokenKind::Keyword(KeywordId::Import) => self.import_stmt()?,
            TokenKind::Keyword(KeywordId::From) => self.import_from_stmt()?,
            TokenKind::Keyword(id) if keywords::info_for(id).category == KeywordCategory::Reserved => {
                return Err(self.unsupported_keyword(id));
            }
            _ => self.assignment_or_expr_stmt()?,
        };

        Ok(Spanned::new(stmt, Span::new(start, self.previous_end())))
    }

    /// `expr`, `t1 = t2 = value`, `target: ann [= value]` or `target op= value`.
    fn assignment_or_expr_stmt(&mut self) -> Result<Stmt, CompileError> {
        let first = self.expression_list()?;

        if self.match_punct(PunctuationId::Colon) {
            if !matches!(first.node, Expr::Name(_) | Expr::Attribute(..) | Expr::Subscript(..)) {
                return Err(CompileError::syntax(
                    format!("Only a single name, attribute or subscript can be annotated, not {}", first.node.kind_name()),
                    first.span,
                ));
            }
            let annotation = self.expression()?;
            let value = if self.match_op(OperatorId::Eq) {
                Some(self.expression_list()?)
            } else {
                None
            };
            return Ok(Stmt::AnnAssign(AnnAssign {
                target: first,
                annotation,
                value,
            }));
        }

        if self.check_op(OperatorId::Eq) {
            let mut targets = vec![first];
            while self.match_op(OperatorId::Eq) {
                targets.push(self.expression_list()?);
            }
            let value = targets.pop().ok_or_else(|| self.error_here("Expected assignment value"))?;
            for target in &targets {
                self.validate_target(target)?;
            }
            return Ok(Stmt::Assign(Assign { targets, value }));
        }

        if let Some(op) = self.augmented_op() {
            self.advance();
            if !matches!(first.node, Expr::Name(_) | Expr::Attribute(..) | Expr::Subscript(..)) {
                return Err(CompileError::syntax(
                    format!("Illegal target for augmented assignment: {}", first.node.kind_name()),
                    first.span,
                ));
            }
            let value = self.expression_list()?;
            return Ok(Stmt::AugAssign(AugAssign {
                target: first,
                op,
                value,
            }));
        }

        Ok(Stmt::Expr(first))
    }

    fn augmented_op(&self) -> Option<BinOpKind> {
        match self.peek().kind {
            TokenKind::Operator(OperatorId::PlusEq) => Some(BinOpKind::Add),
            TokenKind::Operator(OperatorId::MinusEq) => Some(BinOpKind::Sub),
            TokenKind::Operator(OperatorId::StarEq) => Some(BinOpKind::Mult),
            TokenKind::Operator(OperatorId::SlashEq) => Some(BinOpKind::Div),
            TokenKind::Operator(OperatorId::SlashSlashEq) => Some(BinOpKind::FloorDiv),
            TokenKind::Operator(OperatorId::PercentEq) => Some(BinOpKind::Mod),
            _ => None,
        }
    }

    /// `import a.b [as c], d`
    fn import_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect_keyword(KeywordId::Import, "Expected 'import'")?;
        let mut names = vec![self.import_alias()?];
        while self.match_punct(PunctuationId::Comma) {
            names.push(self.import_alias()?);
        }
        Ok(Stmt::Import(names))
    }

    /// `from a.b import c [as d], e` or `from a import (c, d)` or `from a import *`
    fn import_from_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect_keyword(KeywordId::From, "Expected 'from'")?;
        if self.check_punct(PunctuationId::Dot) || self.check_punct(PunctuationId::Ellipsis) {
            return Err(CompileError::syntax(
                "Relative imports are not supported".to_string(),
                self.current_span(),
            ));
        }
        let module = self.dotted_name()?;
        self.expect_keyword(KeywordId::Import, "Expected 'import' after module name")?;

        let mut names = Vec::new();
        if self.match_op(OperatorId::Star) {
            names.push(ImportAlias::new("*"));
        } else if self.match_punct(PunctuationId::LParen) {
            while !self.check_punct(PunctuationId::RParen) {
                names.push(self.import_alias()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::RParen, "Expected ')' after imported names")?;
            if names.is_empty() {
                return Err(self.error_here("Expected at least one imported name"));
            }
        } else {
            names.push(self.import_alias()?);
            while self.match_punct(PunctuationId::Comma) {
                names.push(self.import_alias()?);
            }
        }

        Ok(Stmt::ImportFrom(ImportFrom { module, names }))
    }

    fn import_alias(&mut self) -> Result<ImportAlias, CompileError> {
        let name = self.dotted_name()?;
        let asname = if self.match_keyword(KeywordId::As) {
            Some(self.identifier()?)
        } else {
            None
        };
        Ok(ImportAlias { name, asname })
    }

    /// Reject tree shapes Python refuses to assign to (`1 = x`, `f() = y`).
    fn validate_target(&self, target: &Spanned<Expr>) -> Result<(), CompileError> {
        match &target.node {
            Expr::Name(_) | Expr::Attribute(..) | Expr::Subscript(..) => Ok(()),
            Expr::Tuple(items) | Expr::List(items) => items.iter().try_for_each(|item| self.validate_target(item)),
            other => Err(CompileError::syntax(
                format!("Cannot assign to {}", other.kind_name()),
                target.span,
            )),
        }
    }

    fn unsupported_keyword(&self, id: KeywordId) -> CompileError {
        CompileError::syntax(
            format!("'{}' is not supported by pytircy", keywords::as_str(id)),
            self.current_span(),
        )
        .with_note("pytircy translates declarations, assignments, calls, conditionals, functions and imports")
    }
}

/// Expression parsing methods.
///
/// This chunk implements the expression grammar using a precedence ladder:
/// `or` → `and` → `not` → comparison → `|` → `^` → `&` → shift → additive → multiplicative → unary → power →
/// postfix → atom.
///
/// ## Notes
/// - Operator identities are carried by [`TokenKind::Operator`] / [`OperatorId`] rather than string spellings.
/// - Comparisons are collected into a single `Compare` node with parallel `ops` / `comparators`, so `a < b < c`
///   keeps its chained shape.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse an expression or a bare comma-separated tuple (`a, b`).
    fn expression_list(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let first = self.expression()?;
        if !self.check_punct(PunctuationId::Comma) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if !self.is_at_expr_start() {
                break;
            }
            items.push(self.expression()?);
        }
        Ok(Spanned::new(Expr::Tuple(items), Span::new(start, self.previous_end())))
    }

    /// Parse a `for` target: one or more comma-separated operands that stop before `in`.
    fn target_list(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let first = self.bitor_expr()?;
        if !self.check_punct(PunctuationId::Comma) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_keyword(KeywordId::In) {
                break;
            }
            items.push(self.bitor_expr()?);
        }
        Ok(Spanned::new(Expr::Tuple(items), Span::new(start, self.previous_end())))
    }

    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let expr = self.or_expr()?;
        if self.check_keyword(KeywordId::If) {
            return Err(CompileError::syntax(
                "Conditional expressions are not supported".to_string(),
                self.current_span(),
            ));
        }
        Ok(expr)
    }

    fn or_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.bool_chain(KeywordId::Or, BoolOpKind::Or, Self::and_expr)
    }

    fn and_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.bool_chain(KeywordId::And, BoolOpKind::And, Self::not_expr)
    }

    /// `a or b or c` → one `BoolOp` with three operands.
    fn bool_chain(
        &mut self,
        keyword: KeywordId,
        kind: BoolOpKind,
        operand: fn(&mut Self) -> Result<Spanned<Expr>, CompileError>,
    ) -> Result<Spanned<Expr>, CompileError> {
        let first = operand(self)?;
        if !self.check_keyword(keyword) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut values = vec![first];
        while self.match_keyword(keyword) {
            values.push(operand(self)?);
        }
        Ok(Spanned::new(
            Expr::BoolOp(kind, values),
            Span::new(start, self.previous_end()),
        ))
    }

    fn not_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        if self.check_keyword(KeywordId::Not) {
            let start = self.current_span().start;
            self.advance();
            let operand = self.not_expr()?;
            let span = Span::new(start, operand.span.end);
            return Ok(Spanned::new(Expr::UnaryOp(UnaryOpKind::Not, Box::new(operand)), span));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let left = self.bitor_expr()?;

        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.comparison_op() {
            ops.push(op);
            comparators.push(self.bitor_expr()?);
        }

        if ops.is_empty() {
            return Ok(left);
        }

        let span = Span::new(left.span.start, self.previous_end());
        Ok(Spanned::new(
            Expr::Compare {
                left: Box::new(left),
                ops,
                comparators,
            },
            span,
        ))
    }

    /// Consume a comparison operator, including the two-word forms `not in` and `is not`.
    fn comparison_op(&mut self) -> Option<CmpOp> {
        let op = match self.peek().kind {
            TokenKind::Operator(OperatorId::EqEq) => CmpOp::Eq,
            TokenKind::Operator(OperatorId::NotEq) => CmpOp::NotEq,
            TokenKind::Operator(OperatorId::Lt) => CmpOp::Lt,
            TokenKind::Operator(OperatorId::LtEq) => CmpOp::LtE,
            TokenKind::Operator(OperatorId::Gt) => CmpOp::Gt,
            TokenKind::Operator(OperatorId::GtEq) => CmpOp::GtE,
            TokenKind::Keyword(KeywordId::In) => CmpOp::In,
            TokenKind::Keyword(KeywordId::Not) if self.peek_next().kind.is_keyword(KeywordId::In) => {
                self.advance();
                CmpOp::NotIn
            }
            TokenKind::Keyword(KeywordId::Is) => {
                if self.peek_next().kind.is_keyword(KeywordId::Not) {
                    self.advance();
                    CmpOp::IsNot
                } else {
                    CmpOp::Is
                }
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn bitor_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.binary_level(&[(OperatorId::Pipe, BinOpKind::BitOr)], Self::bitxor_expr)
    }

    fn bitxor_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.binary_level(&[(OperatorId::Caret, BinOpKind::BitXor)], Self::bitand_expr)
    }

    fn bitand_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.binary_level(&[(OperatorId::Amp, BinOpKind::BitAnd)], Self::shift_expr)
    }

    fn shift_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.binary_level(
            &[(OperatorId::Shl, BinOpKind::LShift), (OperatorId::Shr, BinOpKind::RShift)],
            Self::additive,
        )
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.binary_level(
            &[(OperatorId::Plus, BinOpKind::Add), (OperatorId::Minus, BinOpKind::Sub)],
            Self::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.binary_level(
            &[
                (OperatorId::Star, BinOpKind::Mult),
                (OperatorId::SlashSlash, BinOpKind::FloorDiv),
                (OperatorId::Slash, BinOpKind::Div),
                (OperatorId::Percent, BinOpKind::Mod),
                (OperatorId::At, BinOpKind::MatMult),
            ],
            Self::unary,
        )
    }

    /// One left-associative binary precedence level.
    fn binary_level(
        &mut self,
        table: &[(OperatorId, BinOpKind)],
        operand: fn(&mut Self) -> Result<Spanned<Expr>, CompileError>,
    ) -> Result<Spanned<Expr>, CompileError> {
        let mut left = operand(self)?;

        'outer: loop {
            for &(id, kind) in table {
                if self.match_op(id) {
                    let right = operand(self)?;
                    let span = left.span.merge(right.span);
                    left = Spanned::new(Expr::BinOp(Box::new(left), kind, Box::new(right)), span);
                    continue 'outer;
                }
            }
            break;
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let op = match self.peek().kind {
            TokenKind::Operator(OperatorId::Minus) => UnaryOpKind::USub,
            TokenKind::Operator(OperatorId::Plus) => UnaryOpKind::UAdd,
            TokenKind::Operator(OperatorId::Tilde) => UnaryOpKind::Invert,
            _ => return self.power(),
        };
        let start = self.current_span().start;
        self.advance();
        let operand = self.unary()?;
        let span = Span::new(start, operand.span.end);
        Ok(Spanned::new(Expr::UnaryOp(op, Box::new(operand)), span))
    }

    /// `base ** exponent`, right-associative; the exponent may carry its own unary sign (`2 ** -1`).
    fn power(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let base = self.postfix()?;
        if !self.match_op(OperatorId::StarStar) {
            return Ok(base);
        }
        let exponent = self.unary()?;
        let span = base.span.merge(exponent.span);
        Ok(Spanned::new(
            Expr::BinOp(Box::new(base), BinOpKind::Pow, Box::new(exponent)),
            span,
        ))
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.atom()?;

        loop {
            if self.match_punct(PunctuationId::LParen) {
                let (args, keywords) = self.call_args()?;
                self.expect_punct(PunctuationId::RParen, "Expected ')' after arguments")?;
                let span = Span::new(expr.span.start, self.previous_end());
                expr = Spanned::new(
                    Expr::Call {
                        func: Box::new(expr),
                        args,
                        keywords,
                    },
                    span,
                );
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.subscript_index()?;
                self.expect_punct(PunctuationId::RBracket, "Expected ']' after subscript")?;
                let span = Span::new(expr.span.start, self.previous_end());
                expr = Spanned::new(Expr::Subscript(Box::new(expr), Box::new(index)), span);
            } else if self.match_punct(PunctuationId::Dot) {
                let attr = self.identifier()?;
                let span = Span::new(expr.span.start, self.previous_end());
                expr = Spanned::new(Expr::Attribute(Box::new(expr), attr), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse the contents of `[...]` after a value: an index, a slice, or a tuple of them.
    fn subscript_index(&mut self) -> Result<Spanned<Expr>, CompileError> {
        if self.check_punct(PunctuationId::RBracket) {
            return Err(CompileError::syntax(
                "Empty subscript is not allowed".to_string(),
                self.current_span(),
            ));
        }

        let first = self.slice_item()?;
        if !self.check_punct(PunctuationId::Comma) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RBracket) {
                break;
            }
            items.push(self.slice_item()?);
        }
        Ok(Spanned::new(Expr::Tuple(items), Span::new(start, self.previous_end())))
    }

    /// Handles: `expr`, `lower:upper`, `lower:upper:step`, `:upper`, `lower:`, `::step`.
    fn slice_item(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;

        let lower = if self.check_punct(PunctuationId::Colon) {
            None
        } else {
            let expr = self.expression()?;
            if !self.check_punct(PunctuationId::Colon) {
                return Ok(expr);
            }
            Some(Box::new(expr))
        };

        self.expect_punct(PunctuationId::Colon, "Expected ':' in slice")?;
        let upper = self.optional_slice_bound()?;
        let step = if self.match_punct(PunctuationId::Colon) {
            self.optional_slice_bound()?
        } else {
            None
        };

        Ok(Spanned::new(
            Expr::Slice { lower, upper, step },
            Span::new(start, self.previous_end()),
        ))
    }

    fn optional_slice_bound(&mut self) -> Result<Option<Box<Spanned<Expr>>>, CompileError> {
        if self.check_punct(PunctuationId::Colon)
            || self.check_punct(PunctuationId::Comma)
            || self.check_punct(PunctuationId::RBracket)
        {
            Ok(None)
        } else {
            Ok(Some(Box::new(self.expression()?)))
        }
    }

    fn atom(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;

        let expr = match self.peek().kind {
            TokenKind::Ident(ref name) => {
                let name = name.clone();
                self.advance();
                Expr::Name(name)
            }
            TokenKind::Int(n) => {
                self.advance();
                Expr::Constant(Constant::Int(n))
            }
            TokenKind::Float(f) => {
                self.advance();
                Expr::Constant(Constant::Float(f))
            }
            TokenKind::String { .. } | TokenKind::Bytes(_) => Expr::Constant(self.string_constant()?),
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Expr::Constant(Constant::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Expr::Constant(Constant::Bool(false))
            }
            TokenKind::Keyword(KeywordId::None) => {
                self.advance();
                Expr::Constant(Constant::None)
            }
            TokenKind::Punctuation(PunctuationId::Ellipsis) => {
                self.advance();
                Expr::Constant(Constant::Ellipsis)
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                return self.paren_or_tuple(start);
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                return self.list_display(start);
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                self.advance();
                return self.dict_display(start);
            }
            TokenKind::Keyword(id) if keywords::info_for(id).category == KeywordCategory::Reserved => {
                return Err(self.unsupported_keyword(id));
            }
            _ => return Err(self.error_here("Expected expression")),
        };

        Ok(Spanned::new(expr, Span::new(start, self.previous_end())))
    }

    /// `()` → empty tuple, `(x)` → x, `(x,)` / `(x, y)` → tuple.
    fn paren_or_tuple(&mut self, start: usize) -> Result<Spanned<Expr>, CompileError> {
        if self.match_punct(PunctuationId::RParen) {
            return Ok(Spanned::new(Expr::Tuple(Vec::new()), Span::new(start, self.previous_end())));
        }

        let first = self.expression()?;
        if self.match_punct(PunctuationId::RParen) {
            return Ok(first);
        }
        self.reject_comprehension()?;

        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RParen) {
                break;
            }
            items.push(self.expression()?);
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' after tuple")?;
        Ok(Spanned::new(Expr::Tuple(items), Span::new(start, self.previous_end())))
    }

    fn list_display(&mut self, start: usize) -> Result<Spanned<Expr>, CompileError> {
        let mut items = Vec::new();
        if !self.check_punct(PunctuationId::RBracket) {
            items.push(self.expression()?);
            self.reject_comprehension()?;
            while self.match_punct(PunctuationId::Comma) {
                if self.check_punct(PunctuationId::RBracket) {
                    break;
                }
                items.push(self.expression()?);
            }
        }
        self.expect_punct(PunctuationId::RBracket, "Expected ']' after list elements")?;
        Ok(Spanned::new(Expr::List(items), Span::new(start, self.previous_end())))
    }

    fn dict_display(&mut self, start: usize) -> Result<Spanned<Expr>, CompileError> {
        let mut entries = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            let key = self.expression()?;
            if !self.check_punct(PunctuationId::Colon) {
                return Err(CompileError::syntax(
                    "Set literals are not supported".to_string(),
                    Span::new(start, key.span.end),
                )
                .with_hint("Use a list literal instead"));
            }
            self.advance();
            let value = self.expression()?;
            self.reject_comprehension()?;
            entries.push((key, value));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace, "Expected '}' after dict entries")?;
        Ok(Spanned::new(Expr::Dict(entries), Span::new(start, self.previous_end())))
    }

    fn reject_comprehension(&self) -> Result<(), CompileError> {
        if self.check_keyword(KeywordId::For) {
            return Err(CompileError::syntax(
                "Comprehensions are not supported".to_string(),
                self.current_span(),
            ));
        }
        Ok(())
    }

    /// Parse call arguments after `(`: positional arguments followed by `name=value` keywords.
    fn call_args(&mut self) -> Result<(Vec<Spanned<Expr>>, Vec<Spanned<Keyword>>), CompileError> {
        let mut args = Vec::new();
        let mut keywords = Vec::new();

        while !self.check_punct(PunctuationId::RParen) {
            if self.check_op(OperatorId::Star) || self.check_op(OperatorId::StarStar) {
                return Err(CompileError::syntax(
                    "Argument unpacking is not supported".to_string(),
                    self.current_span(),
                ));
            }

            let is_keyword = matches!(self.peek().kind, TokenKind::Ident(_))
                && self.peek_next().kind.is_operator(OperatorId::Eq);
            if is_keyword {
                let start = self.current_span().start;
                let arg = self.identifier()?;
                self.advance();
                let value = self.expression()?;
                let span = Span::new(start, value.span.end);
                keywords.push(Spanned::new(Keyword { arg, value }, span));
            } else {
                let value = self.expression()?;
                if !keywords.is_empty() {
                    return Err(CompileError::syntax(
                        "Positional argument follows keyword argument".to_string(),
                        value.span,
                    ));
                }
                self.reject_comprehension()?;
                args.push(value);
            }

            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        Ok((args, keywords))
    }
}

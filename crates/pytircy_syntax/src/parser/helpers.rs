/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Layout handling (`skip_newlines`, `skip_dedents`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        let current = self.pos.min(self.tokens.len() - 1);
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// End offset of the most recently consumed token.
    fn previous_end(&self) -> usize {
        self.tokens[self.pos.saturating_sub(1)].span.end
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn check_newline(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Newline)
    }

    fn check_indent(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Indent)
    }

    fn check_dedent(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Dedent)
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Build a syntax error of the form `"{msg}, found {token}"` at the current token.
    fn error_here(&self, msg: &str) -> CompileError {
        CompileError::syntax(format!("{}, found {}", msg, self.peek().kind), self.current_span())
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&Token, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn skip_newlines(&mut self) {
        while self.check_newline() {
            self.advance();
        }
    }

    /// Skip stray DEDENT tokens at the current position.
    ///
    /// These should not appear at module level, but can show up after error recovery.
    fn skip_dedents(&mut self) {
        while self.check_dedent() {
            self.advance();
        }
    }

    /// Skip to the start of the next logical line.
    ///
    /// If the failed line opened an indented block, the whole block is skipped too so its body does not produce a
    /// cascade of "unexpected indent" errors.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.check_newline() {
                self.advance();
                if self.check_indent() {
                    self.skip_indented_block();
                }
                return;
            }
            self.advance();
        }
    }

    /// Consume an INDENT and everything up to its matching DEDENT.
    fn skip_indented_block(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.advance().kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Check if the current token can start an expression.
    fn is_at_expr_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::String { .. }
                | TokenKind::Bytes(_)
        ) || self.check_keyword(KeywordId::True)
            || self.check_keyword(KeywordId::False)
            || self.check_keyword(KeywordId::None)
            || self.check_keyword(KeywordId::Not)
            || self.check_punct(PunctuationId::LParen)
            || self.check_punct(PunctuationId::LBracket)
            || self.check_punct(PunctuationId::LBrace)
            || self.check_punct(PunctuationId::Ellipsis)
            || self.check_op(OperatorId::Minus)
            || self.check_op(OperatorId::Plus)
            || self.check_op(OperatorId::Tilde)
    }
}

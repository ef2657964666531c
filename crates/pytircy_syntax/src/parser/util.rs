/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers that don’t cleanly fit into “stmts” or “expr” (identifier and
/// dotted-name parsing, string literal concatenation).
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(id) => {
                let id = *id;
                Err(CompileError::syntax(
                    format!("Expected identifier, found keyword '{}'", keywords::as_str(id)),
                    self.current_span(),
                )
                .with_hint(format!("'{}' is reserved and cannot be used as a name", keywords::as_str(id))))
            }
            _ => Err(self.error_here("Expected identifier")),
        }
    }

    /// `a.b.c`, kept as one dotted string.
    fn dotted_name(&mut self) -> Result<String, CompileError> {
        let mut name = self.identifier()?;
        while self.match_punct(PunctuationId::Dot) {
            name.push('.');
            name.push_str(&self.identifier()?);
        }
        Ok(name)
    }

    /// Parse one or more adjacent string (or bytes) literals into a single constant.
    ///
    /// Like Python, `"a" "b"` is `"ab"`, and the `u` prefix of the first piece decides the string kind.
    fn string_constant(&mut self) -> Result<Constant, CompileError> {
        let start = self.current_span().start;
        let mut text: Option<(String, StrKind)> = None;
        let mut bytes: Option<Vec<u8>> = None;

        loop {
            match &self.peek().kind {
                TokenKind::String { value, kind } => {
                    if bytes.is_some() {
                        return Err(self.mixed_literal_error(start));
                    }
                    let (acc, _) = text.get_or_insert_with(|| (String::new(), *kind));
                    acc.push_str(value);
                }
                TokenKind::Bytes(value) => {
                    if text.is_some() {
                        return Err(self.mixed_literal_error(start));
                    }
                    bytes.get_or_insert_with(Vec::new).extend_from_slice(value);
                }
                _ => break,
            }
            self.advance();
        }

        match (text, bytes) {
            (Some((value, kind)), None) => Ok(Constant::Str { value, kind }),
            (None, Some(value)) => Ok(Constant::Bytes(value)),
            _ => Err(self.error_here("Expected string literal")),
        }
    }

    fn mixed_literal_error(&self, start: usize) -> CompileError {
        CompileError::syntax(
            "Cannot mix bytes and non-bytes literals".to_string(),
            Span::new(start, self.current_span().end),
        )
    }
}

/// Parser core type and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` so all parser methods live in one module.

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at line boundaries, so one run can report
///   several independent syntax errors.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `pytircy_syntax::lexer`; it must end with an `Eof` token.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Module`].
    ///
    /// ## Errors
    /// Returns every [`CompileError`] collected while parsing.
    pub fn parse(mut self) -> Result<Module, Vec<CompileError>> {
        let mut body = Vec::new();

        if self.tokens.is_empty() {
            return Ok(Module { body });
        }

        self.skip_newlines();
        // Stray top-level DEDENT can appear after error recovery.
        self.skip_dedents();

        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
            self.skip_newlines();
            self.skip_dedents();
        }

        if self.errors.is_empty() {
            Ok(Module { body })
        } else {
            Err(self.errors)
        }
    }
}

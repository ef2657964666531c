//! Lexer for the Pytircy source language
//!
//! Handles tokenization including:
//! - Keywords, identifiers and literals (int, float, string, char and byte strings)
//! - Operators and punctuation
//! - Indentation-based blocks (INDENT/DEDENT tokens)
//! - Implicit line continuation inside brackets, explicit continuation with a trailing `\`
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String literal scanning and prefixes
//! - `numbers` - Numeric literal scanning
//! - `indent` - INDENT/DEDENT handling

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use pytircy_core::lang::operators::OperatorId;
use pytircy_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// [Start of line] → count spaces → [Inside code]
//                                       ↓
//                                      see '(' → [bracket_depth++]
//                                       ↓
//                                      see '\n' → skip (inside brackets)
//                                       ↓
//                                      see ')' → [bracket_depth--]
// ============================================================================

/// Lexer for Pytircy source code.
///
/// Converts source text into a stream of tokens. Errors are collected rather than returned eagerly so one run
/// reports every bad character in the file.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    at_line_start: bool,
    /// Bracket depth for implicit line continuation (parens, brackets, braces)
    bracket_depth: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            indent_stack: vec![0],
            pending_dedents: 0,
            at_line_start: true,
            bracket_depth: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token. A final `Newline` is synthesised when the source does not
    /// end with one, so the parser can treat every simple statement as newline-terminated.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        if let Some(last) = self.tokens.last() {
            if !matches!(last.kind, TokenKind::Newline | TokenKind::Dedent) {
                self.tokens.push(Token::new(
                    TokenKind::Newline,
                    Span::new(self.current_pos, self.current_pos),
                ));
            }
        }

        // Emit remaining dedents at EOF
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(Token::new(
                TokenKind::Dedent,
                Span::new(self.current_pos, self.current_pos),
            ));
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].char_indices();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(CompileError::new(message.into(), Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            self.tokens.push(Token::new(
                TokenKind::Dedent,
                Span::new(self.current_pos, self.current_pos),
            ));
            return;
        }

        if self.at_line_start {
            self.handle_indentation();
            return;
        }

        // Skip whitespace (but not newlines)
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '#' => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            }

            '\n' => {
                if self.bracket_depth > 0 {
                    return;
                }
                if !self.at_line_start {
                    self.tokens
                        .push(Token::new(TokenKind::Newline, Span::new(start, self.current_pos)));
                }
                self.at_line_start = true;
            }

            '\r' => {}

            // Explicit line continuation
            '\\' => {
                if self.peek() == Some('\r') {
                    self.advance();
                }
                if !self.match_char('\n') {
                    self.error("Unexpected character after line continuation character", start);
                }
            }

            '+' => self.operator(start, OperatorId::Plus, &[('=', OperatorId::PlusEq)]),
            '-' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::Arrow, start);
                } else if self.match_char('=') {
                    self.add_op(OperatorId::MinusEq, start);
                } else {
                    self.add_op(OperatorId::Minus, start);
                }
            }
            '*' => self.operator(
                start,
                OperatorId::Star,
                &[('*', OperatorId::StarStar), ('=', OperatorId::StarEq)],
            ),
            '/' => self.scan_slash(start),
            '%' => self.operator(start, OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '@' => self.add_op(OperatorId::At, start),
            '&' => self.add_op(OperatorId::Amp, start),
            '|' => self.add_op(OperatorId::Pipe, start),
            '^' => self.add_op(OperatorId::Caret, start),
            '~' => self.add_op(OperatorId::Tilde, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '(' => self.open_bracket(PunctuationId::LParen, start),
            ')' => self.close_bracket(PunctuationId::RParen, start),
            '[' => self.open_bracket(PunctuationId::LBracket, start),
            ']' => self.close_bracket(PunctuationId::RBracket, start),
            '{' => self.open_bracket(PunctuationId::LBrace, start),
            '}' => self.close_bracket(PunctuationId::RBrace, start),
            '=' => self.operator(start, OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.error("Unexpected character '!'", start);
                }
            }
            '<' => self.operator(
                start,
                OperatorId::Lt,
                &[('=', OperatorId::LtEq), ('<', OperatorId::Shl)],
            ),
            '>' => self.operator(
                start,
                OperatorId::Gt,
                &[('=', OperatorId::GtEq), ('>', OperatorId::Shr)],
            ),
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(start, '.');
                } else if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    self.add_punct(PunctuationId::Ellipsis, start);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            '"' | '\'' => self.scan_string(start, c, strings::StringPrefix::default()),

            '0'..='9' => self.scan_number(start, c),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.error(format!("Unexpected character '{}'", c), start),
        }
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    /// Scan slash operators: `/`, `/=`, `//`, `//=`.
    fn scan_slash(&mut self, start: usize) {
        if self.match_char('/') {
            if self.match_char('=') {
                self.add_op(OperatorId::SlashSlashEq, start);
            } else {
                self.add_op(OperatorId::SlashSlash, start);
            }
        } else if self.match_char('=') {
            self.add_op(OperatorId::SlashEq, start);
        } else {
            self.add_op(OperatorId::Slash, start);
        }
    }

    fn open_bracket(&mut self, kind: PunctuationId, start: usize) {
        self.bracket_depth += 1;
        self.add_punct(kind, start);
    }

    /// Produces an error if there's no matching opening bracket.
    fn close_bracket(&mut self, kind: PunctuationId, start: usize) {
        if self.bracket_depth == 0 {
            self.error("Unmatched closing bracket", start);
        } else {
            self.bracket_depth -= 1;
        }
        self.add_punct(kind, start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // `u"c"`, `b"..."`, `r"..."`: the identifier was actually a string prefix.
        if let Some(quote) = self.peek().filter(|q| *q == '"' || *q == '\'') {
            if let Some(prefix) = strings::StringPrefix::parse(spelling) {
                self.advance();
                self.scan_string(start, quote, prefix);
                return;
            }
        }

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StrKind;
    use pytircy_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        use pytircy_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", k.canonical, errs));
            assert!(tokens[0].kind.is_keyword(k.id), "{:?}", k.id);
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        use pytircy_core::lang::operators;

        for o in operators::OPERATORS {
            if o.is_keyword_spelling {
                continue;
            }
            for &sp in o.spellings {
                let tokens = lex(sp).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", sp, errs));
                assert!(tokens[0].kind.is_operator(o.id), "{sp:?} lexed as {:?}", tokens[0].kind);
                assert!(matches!(tokens[1].kind, TokenKind::Newline));
            }
        }
    }

    #[test]
    fn test_declaration_tokens() {
        let tokens = kinds("x: int = 5");
        assert!(matches!(&tokens[0], TokenKind::Ident(s) if s == "x"));
        assert!(tokens[1].is_punctuation(PunctuationId::Colon));
        assert!(matches!(&tokens[2], TokenKind::Ident(s) if s == "int"));
        assert!(tokens[3].is_operator(OperatorId::Eq));
        assert!(matches!(tokens[4], TokenKind::Int(5)));
        assert!(matches!(tokens[5], TokenKind::Newline));
        assert!(matches!(tokens[6], TokenKind::Eof));
    }

    #[test]
    fn test_def_header() {
        let tokens = kinds("def add(a: int) -> int:");
        assert!(tokens[0].is_keyword(KeywordId::Def));
        assert!(tokens[6].is_punctuation(PunctuationId::RParen));
        assert!(tokens[7].is_punctuation(PunctuationId::Arrow));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_numbers() {
        let tokens = kinds("42 3.14 1_000_000 1e10 0x1f .5 2.");
        assert!(matches!(tokens[0], TokenKind::Int(42)));
        assert!(matches!(tokens[1], TokenKind::Float(f) if (f - 3.14).abs() < 0.001));
        assert!(matches!(tokens[2], TokenKind::Int(1000000)));
        assert!(matches!(tokens[3], TokenKind::Float(f) if f == 1e10));
        assert!(matches!(tokens[4], TokenKind::Int(31)));
        assert!(matches!(tokens[5], TokenKind::Float(f) if f == 0.5));
        assert!(matches!(tokens[6], TokenKind::Float(f) if f == 2.0));
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        let errors = lex("99999999999999999999").unwrap_err();
        assert!(errors[0].message.contains("out of range"));
    }

    #[test]
    fn test_misplaced_digit_separators_are_errors() {
        for source in ["1_", "1__0", "1_.5", "1._5", "1e_5", "0x1f_", "0b1__0"] {
            let errors = lex(source).unwrap_err();
            assert_eq!(errors.len(), 1, "{source}: {errors:?}");
            assert!(errors[0].message.contains("'_' must separate two digits"), "{source}");
            assert!(errors[0].message.ends_with(source), "{source}: {}", errors[0].message);
        }
    }

    #[test]
    fn test_valid_digit_separators() {
        let tokens = kinds("1_0 0_0 0x_1f 1_0.2_5 1e1_0");
        assert!(matches!(tokens[0], TokenKind::Int(10)));
        assert!(matches!(tokens[1], TokenKind::Int(0)));
        assert!(matches!(tokens[2], TokenKind::Int(31)));
        assert!(matches!(tokens[3], TokenKind::Float(f) if f == 10.25));
        assert!(matches!(tokens[4], TokenKind::Float(f) if f == 1e10));
    }

    #[test]
    fn test_leading_zeros_in_decimal_integers() {
        let errors = lex("007").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Leading zeros"));
        assert!(errors[0].message.ends_with("007"));

        // All-zero integers, floats and prefixed integers are fine.
        let tokens = kinds("00 007.5 0o7");
        assert!(matches!(tokens[0], TokenKind::Int(0)));
        assert!(matches!(tokens[1], TokenKind::Float(f) if f == 7.5));
        assert!(matches!(tokens[2], TokenKind::Int(7)));
    }

    #[test]
    fn test_strings_and_prefixes() {
        let tokens = kinds(r#""hello" 'world' u'c' b"raw" r"\n""#);
        assert!(matches!(&tokens[0], TokenKind::String { value, kind: StrKind::Plain } if value == "hello"));
        assert!(matches!(&tokens[1], TokenKind::String { value, kind: StrKind::Plain } if value == "world"));
        assert!(matches!(&tokens[2], TokenKind::String { value, kind: StrKind::Char } if value == "c"));
        assert!(matches!(&tokens[3], TokenKind::Bytes(b) if b == b"raw"));
        assert!(matches!(&tokens[4], TokenKind::String { value, .. } if value == "\\n"));
    }

    #[test]
    fn test_escapes() {
        let tokens = kinds(r#""a\tb\"c" "\q""#);
        assert!(matches!(&tokens[0], TokenKind::String { value, .. } if value == "a\tb\"c"));
        assert!(matches!(&tokens[1], TokenKind::String { value, .. } if value == "\\q"));
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let tokens = kinds("\"\"\"one\ntwo\"\"\"\nx");
        assert!(matches!(&tokens[0], TokenKind::String { value, .. } if value == "one\ntwo"));
        assert!(matches!(tokens[1], TokenKind::Newline));
        assert!(matches!(&tokens[2], TokenKind::Ident(s) if s == "x"));
    }

    #[test]
    fn test_fstring_rejected() {
        let errors = lex("f\"{x}\"").unwrap_err();
        assert!(errors[0].message.contains("f-strings"));
    }

    #[test]
    fn test_unterminated_string() {
        let errors = lex("'abc\nx = 1").unwrap_err();
        assert!(errors[0].message.contains("Unterminated string"));
    }

    #[test]
    fn test_indentation() {
        let source = "def foo() -> int:\n    x: int = 1\n    return x\ny = 3";
        let tokens = kinds(source);
        let indent_count = tokens.iter().filter(|t| matches!(t, TokenKind::Indent)).count();
        let dedent_count = tokens.iter().filter(|t| matches!(t, TokenKind::Dedent)).count();
        assert_eq!(indent_count, 1);
        assert_eq!(dedent_count, 1);
    }

    #[test]
    fn test_multiple_dedents() {
        let source = "def foo() -> int:\n  if x:\n    y = 1\nz = 2";
        let tokens = kinds(source);
        let indent_count = tokens.iter().filter(|t| matches!(t, TokenKind::Indent)).count();
        let dedent_count = tokens.iter().filter(|t| matches!(t, TokenKind::Dedent)).count();
        assert_eq!(indent_count, 2);
        assert_eq!(dedent_count, 2);
    }

    #[test]
    fn test_dedents_flushed_at_eof() {
        let tokens = kinds("if x:\n    if y:\n        z = 1\n");
        let dedent_count = tokens.iter().filter(|t| matches!(t, TokenKind::Dedent)).count();
        assert_eq!(dedent_count, 2);
        assert!(matches!(tokens.last(), Some(TokenKind::Eof)));
    }

    #[test]
    fn test_inconsistent_dedent() {
        let errors = lex("if x:\n    y = 1\n  z = 2\n").unwrap_err();
        assert!(errors[0].message.contains("Inconsistent indentation"));
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let tokens = kinds("x = 1\n\n# comment\n   \ny = 2\n");
        let newline_count = tokens.iter().filter(|t| matches!(t, TokenKind::Newline)).count();
        assert_eq!(newline_count, 2);
        assert!(!tokens.iter().any(|t| matches!(t, TokenKind::Indent)));
    }

    #[test]
    fn test_newlines_inside_brackets() {
        let tokens = kinds("foo(\n  x,\n  y\n)");
        let newline_count = tokens.iter().filter(|t| matches!(t, TokenKind::Newline)).count();
        assert_eq!(newline_count, 1, "only the synthesised trailing newline");
    }

    #[test]
    fn test_backslash_continuation() {
        let tokens = kinds("x = 1 + \\\n    2\n");
        assert!(!tokens.iter().any(|t| matches!(t, TokenKind::Indent)));
        assert!(matches!(tokens[4], TokenKind::Int(2)));
    }

    #[test]
    fn test_unicode_identifier_rejected() {
        let errors = lex("π = 1").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unexpected character"));
    }

    #[test]
    fn test_unmatched_closing_bracket() {
        let errors = lex(")").unwrap_err();
        assert!(errors[0].message.contains("Unmatched closing bracket"));
    }

    #[test]
    fn test_ellipsis_and_dot() {
        let tokens = kinds("... a.b");
        assert!(tokens[0].is_punctuation(PunctuationId::Ellipsis));
        assert!(tokens[2].is_punctuation(PunctuationId::Dot));
    }
}

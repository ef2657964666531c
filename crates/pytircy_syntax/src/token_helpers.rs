//! Small helper APIs for working with `TokenKind`.
//!
//! These helpers reduce repetitive `matches!(...)` at call sites that work with ID-based tokens.

use std::fmt;

use crate::lexer::TokenKind;
use pytircy_core::lang::keywords::{self, KeywordId};
use pytircy_core::lang::operators::{self, OperatorId};
use pytircy_core::lang::punctuation::{self, PunctuationId};

impl TokenKind {
    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for tokens that end a simple statement.
    pub fn is_statement_end(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof)
            || self.is_punctuation(PunctuationId::Semicolon)
    }
}

/// Human-readable token description for “expected X, found Y” messages.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Int(v) => write!(f, "integer {}", v),
            TokenKind::Float(v) => write!(f, "float {:?}", v),
            TokenKind::String { .. } => write!(f, "string literal"),
            TokenKind::Bytes(_) => write!(f, "bytes literal"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Indent => write!(f, "indent"),
            TokenKind::Dedent => write!(f, "dedent"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

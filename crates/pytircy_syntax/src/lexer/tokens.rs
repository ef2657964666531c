//! Token types for the Pytircy lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::{Span, StrKind};
use pytircy_core::lang::keywords::{self, KeywordId};
use pytircy_core::lang::operators::OperatorId;
use pytircy_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Int(i64),
    Float(f64),
    String { value: String, kind: StrKind },
    Bytes(Vec<u8>),

    // ========== Indentation ==========
    Newline,
    Indent,
    Dedent,

    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}

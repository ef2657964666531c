//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the lexer/parser: delimiters,
//! separators, and a few structural markers.
//!
//! ## Examples
//! ```rust
//! use pytircy_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("->"), Some(PunctuationId::Arrow));
//! assert_eq!(punctuation::as_str(PunctuationId::LBracket), "[");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `:`.
    Separator,
    /// Attribute access.
    Access,
    /// `->` and `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Colon,
    Semicolon,
    Dot,
    Arrow,
    Ellipsis,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Marker),
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION.iter().find(|p| p.id == id).expect("punctuation info missing")
}

/// Return the canonical spelling of a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a spelling to its punctuation id.
pub fn from_str(spelling: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == spelling).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}

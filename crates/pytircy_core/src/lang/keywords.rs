//! Define the reserved keyword vocabulary for the Pytircy source language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`True` is a keyword, `true` is an identifier).
//! - Some reserved words are also “word operators” (e.g. `and`). If you need operator precedence, use
//!   [`crate::lang::operators`].
//! - Words in [`KeywordCategory::Reserved`] are recognised only so the parser can reject them with a clear message;
//!   the compiler has no lowering for them.
//!
//! ## Examples
//! ```rust
//! use pytircy_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("def"), Some(KeywordId::Def));
//! assert_eq!(keywords::as_str(KeywordId::None), "None");
//! assert_eq!(keywords::from_str("print"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Elif,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,
    Pass,

    // Definitions / imports
    Def,
    Import,
    From,
    As,

    // Literals
    True,
    False,
    None,

    // Word operators
    And,
    Or,
    Not,
    In,
    Is,

    // Reserved by the host grammar, never lowered
    Class,
    Lambda,
    Global,
    Nonlocal,
    Del,
    With,
    Try,
    Except,
    Finally,
    Raise,
    Yield,
    Assert,
    Async,
    Await,
}

/// High-level grouping for documentation and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Literal,
    Operator,
    Reserved,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Elif, "elif", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::Pass, "pass", KeywordCategory::ControlFlow),
    // Definitions / imports
    info(KeywordId::Def, "def", KeywordCategory::Definition),
    info(KeywordId::Import, "import", KeywordCategory::Definition),
    info(KeywordId::From, "from", KeywordCategory::Definition),
    info(KeywordId::As, "as", KeywordCategory::Definition),
    // Literals
    info(KeywordId::True, "True", KeywordCategory::Literal),
    info(KeywordId::False, "False", KeywordCategory::Literal),
    info(KeywordId::None, "None", KeywordCategory::Literal),
    // Word operators
    info(KeywordId::And, "and", KeywordCategory::Operator),
    info(KeywordId::Or, "or", KeywordCategory::Operator),
    info(KeywordId::Not, "not", KeywordCategory::Operator),
    info(KeywordId::In, "in", KeywordCategory::Operator),
    info(KeywordId::Is, "is", KeywordCategory::Operator),
    // Reserved
    info(KeywordId::Class, "class", KeywordCategory::Reserved),
    info(KeywordId::Lambda, "lambda", KeywordCategory::Reserved),
    info(KeywordId::Global, "global", KeywordCategory::Reserved),
    info(KeywordId::Nonlocal, "nonlocal", KeywordCategory::Reserved),
    info(KeywordId::Del, "del", KeywordCategory::Reserved),
    info(KeywordId::With, "with", KeywordCategory::Reserved),
    info(KeywordId::Try, "try", KeywordCategory::Reserved),
    info(KeywordId::Except, "except", KeywordCategory::Reserved),
    info(KeywordId::Finally, "finally", KeywordCategory::Reserved),
    info(KeywordId::Raise, "raise", KeywordCategory::Reserved),
    info(KeywordId::Yield, "yield", KeywordCategory::Reserved),
    info(KeywordId::Assert, "assert", KeywordCategory::Reserved),
    info(KeywordId::Async, "async", KeywordCategory::Reserved),
    info(KeywordId::Await, "await", KeywordCategory::Reserved),
];

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Return the canonical spelling of a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == spelling).map(|k| k.id)
}

/// Return `true` if the keyword is reserved but has no lowering.
pub fn is_reserved_only(id: KeywordId) -> bool {
    info_for(id).category == KeywordCategory::Reserved
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips_through_its_spelling() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "{:?}", k.id);
        }
    }

    #[test]
    fn keyword_spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for k in KEYWORDS {
            assert!(seen.insert(k.canonical), "duplicate spelling {:?}", k.canonical);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("True"), Some(KeywordId::True));
        assert_eq!(from_str("true"), None);
    }

    #[test]
    fn reserved_words_are_flagged() {
        assert!(is_reserved_only(KeywordId::Class));
        assert!(!is_reserved_only(KeywordId::Def));
    }
}

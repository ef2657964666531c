//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and word operators like `and`) along
//! with precedence, associativity, and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Some operators are spelled using reserved words (e.g. `"and"`). Those entries have
//!   [`OperatorInfo::is_keyword_spelling`] set to `true`; the lexer produces keyword tokens for them.
//! - Precedence follows the Python reference grammar: higher binds tighter.
//!
//! ## Examples
//! ```rust
//! use pytircy_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("//"), Some(OperatorId::SlashSlash));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    /// Comparisons chain (`a < b < c`) instead of associating.
    Chain,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// Only valid as a statement-level assignment marker.
    Assign,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    At,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    SlashSlashEq,
    PercentEq,

    // Word operators
    And,
    Or,
    Not,
    In,
    Is,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, &["+"], 50, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Minus, &["-"], 50, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Star, &["*"], 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::StarStar, &["**"], 70, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::Slash, &["/"], 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::SlashSlash, &["//"], 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Percent, &["%"], 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::At, &["@"], 60, Associativity::Left, Fixity::Infix, false),
    // Bitwise
    op(OperatorId::Amp, &["&"], 44, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Pipe, &["|"], 42, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Caret, &["^"], 43, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Tilde, &["~"], 65, Associativity::Right, Fixity::Prefix, false),
    op(OperatorId::Shl, &["<<"], 45, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Shr, &[">>"], 45, Associativity::Left, Fixity::Infix, false),
    // Comparison
    op(OperatorId::EqEq, &["=="], 40, Associativity::Chain, Fixity::Infix, false),
    op(OperatorId::NotEq, &["!="], 40, Associativity::Chain, Fixity::Infix, false),
    op(OperatorId::Lt, &["<"], 40, Associativity::Chain, Fixity::Infix, false),
    op(OperatorId::LtEq, &["<="], 40, Associativity::Chain, Fixity::Infix, false),
    op(OperatorId::Gt, &[">"], 40, Associativity::Chain, Fixity::Infix, false),
    op(OperatorId::GtEq, &[">="], 40, Associativity::Chain, Fixity::Infix, false),
    // Assignment
    op(OperatorId::Eq, &["="], 10, Associativity::Right, Fixity::Assign, false),
    op(OperatorId::PlusEq, &["+="], 10, Associativity::Right, Fixity::Assign, false),
    op(OperatorId::MinusEq, &["-="], 10, Associativity::Right, Fixity::Assign, false),
    op(OperatorId::StarEq, &["*="], 10, Associativity::Right, Fixity::Assign, false),
    op(OperatorId::SlashEq, &["/="], 10, Associativity::Right, Fixity::Assign, false),
    op(OperatorId::SlashSlashEq, &["//="], 10, Associativity::Right, Fixity::Assign, false),
    op(OperatorId::PercentEq, &["%="], 10, Associativity::Right, Fixity::Assign, false),
    // Word operators (keyword spellings)
    op(OperatorId::And, &["and"], 30, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Or, &["or"], 25, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Not, &["not"], 35, Associativity::Right, Fixity::Prefix, true),
    op(OperatorId::In, &["in"], 40, Associativity::Chain, Fixity::Infix, true),
    op(OperatorId::Is, &["is"], 40, Associativity::Chain, Fixity::Infix, true),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the canonical (first) spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}

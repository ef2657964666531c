//! Pytircy language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators, and punctuation.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via registry
//! tables instead of comparing strings across the compiler.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   emission, tests).
//!
//! ## Examples
//! ```rust
//! use pytircy_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elif"), Some(KeywordId::Elif));
//! assert_eq!(keywords::as_str(KeywordId::Elif), "elif");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;

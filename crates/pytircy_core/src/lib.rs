//! Provide the canonical language vocabulary for the Pytircy compiler.
//!
//! This crate is intentionally small and dependency-free. It holds the registries of reserved words, operators, and
//! punctuation that the lexer, parser, and emitter all agree on.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no compiler-specific types.
//! - Spellings live in exactly one place so that diagnostics and emission never drift from what the lexer accepts.

pub mod lang;

//! Shared syntax frontend for the Pytircy source language: lexer, parser, AST, diagnostics.
//!
//! The source language is a typed subset of Python. This crate turns source text into the [`ast::Module`] tree the
//! emitter walks.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it accepts a wider grammar than the emitter supports, so that
//!   unsupported constructs are reported by the emitter by name rather than as parse failures.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `pytircy_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use pytircy_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("x: int = 5\n").unwrap();
//! let module = parser::parse(&tokens).unwrap();
//! assert_eq!(module.body.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

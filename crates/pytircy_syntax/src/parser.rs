//! Parser for the Pytircy source language
//!
//! Converts a token stream into a [`Module`] tree that follows the Python grammar for the subset Pytircy reads.
//! Constructs the emitter cannot lower (loops, attributes, unary operators, ...) are still parsed so the emitter can
//! reject them by name.
//!
//! ## Examples
//!
//! ```rust
//! use pytircy_syntax::{lexer, parser};
//!
//! let source = "def add(a: int, b: int) -> int:\n    return a + b\n";
//! let tokens = lexer::lex(source).unwrap();
//! let module = parser::parse(&tokens).unwrap();
//! assert_eq!(module.body.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use pytircy_core::lang::keywords::{self, KeywordCategory, KeywordId};
use pytircy_core::lang::operators::OperatorId;
use pytircy_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");

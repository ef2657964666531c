//! Pytircy compiler frontend
//!
//! - `lexer`: tokenization of source code
//! - `parser`: parsing tokens into AST
//! - `ast`: abstract syntax tree definitions
//! - `diagnostics`: error reporting

// Syntax components are provided by the shared pytircy_syntax crate.
pub use pytircy_syntax::{ast, diagnostics, lexer, parser};

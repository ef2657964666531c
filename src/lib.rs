#![forbid(unsafe_code)]
//! Pytircy: compile a typed subset of Python to C++ source text.
//!
//! The crate is split the usual way: the frontend (lexer, parser, AST, diagnostics; re-exported from
//! `pytircy_syntax`) produces a [`ast::Module`], and the backend's [`backend::Emitter`] walks it and produces C++.
//! The `cli` module wraps both behind the `pytircy` binary.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//! ```rust
//! let cpp = pytircy::compile_source("x: int = 5\nx = x + 1\n").unwrap();
//! assert_eq!(cpp, "int x = 5;\nx = (x + 1);\n");
//! ```

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod version;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;

pub use backend::{EmitError, Emitter, emit_module};

use diagnostics::CompileError;
use thiserror::Error;

/// Failure of one of the three pipeline stages.
///
/// Lexer and parser errors are batched (every error found is reported); the emitter stops at its first error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("{} lexical error(s)", .0.len())]
    Lex(Vec<CompileError>),
    #[error("{} syntax error(s)", .0.len())]
    Parse(Vec<CompileError>),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl PipelineError {
    /// The syntax errors behind a `Lex` or `Parse` failure; empty for emitter errors.
    pub fn compile_errors(&self) -> &[CompileError] {
        match self {
            PipelineError::Lex(errors) | PipelineError::Parse(errors) => errors,
            PipelineError::Emit(_) => &[],
        }
    }
}

/// Lex, parse and emit `source` in one go.
pub fn compile_source(source: &str) -> Result<String, PipelineError> {
    let tokens = lexer::lex(source).map_err(PipelineError::Lex)?;
    let module = parser::parse(&tokens).map_err(PipelineError::Parse)?;
    Ok(emit_module(&module)?)
}

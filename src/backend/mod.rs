//! Pytircy compiler backend
//!
//! Turns a parsed [`Module`] into C++ source text. There is no intermediate representation: the emitter walks the
//! syntax tree directly and validates each node as it goes.
//!
//! ## Module Organization
//!
//! - `emit/` - the [`Emitter`] and its focused handlers
//!   - `mod.rs` - emitter state, [`Fragment`] and the statement-sequence joiner
//!   - `literals.rs` - constants
//!   - `expressions.rs` - operators, calls, lists, indexing
//!   - `statements.rs` - dispatch, assignments, conditionals, `return`
//!   - `decls.rs` - typed declarations, functions, imports
//!   - `errors.rs` - [`EmitError`]

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod emit;

pub use emit::{EmitError, Emitter, Fragment, RAW_CPP_PREFIX, Termination};

use pytircy_syntax::ast::Module;

/// Emit C++ for `module` with a fresh [`Emitter`].
pub fn emit_module(module: &Module) -> Result<String, EmitError> {
    Emitter::new().emit(module)
}

//! Emit C++ source text from a parsed Pytircy module.
//!
//! This module defines [`Emitter`] and wires together the focused submodules that implement the tree walk. The
//! heavy lifting lives in those submodules; `mod.rs` holds the emitter state, the fragment type and the
//! statement-sequence joiner.
//!
//! ## Notes
//! - Every handler returns either a plain `String` (expressions) or a [`Fragment`] (statements). A fragment records
//!   whether it still needs a `;` terminator or is a self-delimited block (`if`, function, `#include`).
//! - The walk fails fast: the first [`EmitError`] aborts the run and no partial output is returned.
//!
//! ## See also
//! - [`literals`]: constant rendering
//! - [`expressions`]: expression emission
//! - [`statements`]: statement dispatch, assignments and conditionals
//! - [`decls`]: typed declarations, functions and imports

mod decls;
mod errors;
mod expressions;
mod literals;
mod statements;

pub use errors::EmitError;
pub use literals::RAW_CPP_PREFIX;

use pytircy_syntax::ast::{Module, Spanned, Stmt};

/// How a fragment ends when joined into a statement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Needs a `;` before the newline.
    Statement,
    /// Already closed by `}` or a preprocessor line; gets a bare newline.
    Block,
}

/// Text emitted for one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub terminated: Termination,
}

impl Fragment {
    pub fn statement(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            terminated: Termination::Statement,
        }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            terminated: Termination::Block,
        }
    }
}

/// Emit C++ source text from a [`Module`].
///
/// The emitter owns the set of names declared so far (by annotated assignments); plain assignments are checked
/// against it. The set is cleared at the start of every [`Emitter::emit`] call, so one run never sees another's
/// declarations.
#[derive(Debug, Default)]
pub struct Emitter {
    declared: Vec<String>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a whole module as newline-separated C++ statements.
    ///
    /// ## Errors
    /// Returns the first [`EmitError`] met in traversal order.
    #[tracing::instrument(skip_all, fields(statements = module.body.len()))]
    pub fn emit(&mut self, module: &Module) -> Result<String, EmitError> {
        self.declared.clear();
        self.join_sequence(&module.body)
    }

    /// Names declared during the most recent run, in declaration order.
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    fn declare(&mut self, name: &str) {
        tracing::debug!(name, "declared");
        self.declared.push(name.to_string());
    }

    fn is_declared(&self, name: &str) -> bool {
        self.declared.iter().any(|d| d == name)
    }

    /// Emit sibling statements in order: blocks get a bare newline, everything else gets `;\n`.
    fn join_sequence(&mut self, body: &[Spanned<Stmt>]) -> Result<String, EmitError> {
        let mut out = String::new();
        for stmt in body {
            let fragment = self.emit_stmt(&stmt.node)?;
            out.push_str(&fragment.text);
            match fragment.terminated {
                Termination::Block => out.push('\n'),
                Termination::Statement => out.push_str(";\n"),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pytircy_syntax::ast::{AnnAssign, Assign, Expr, ImportAlias};

    fn stmt(node: Stmt) -> Spanned<Stmt> {
        Spanned::synthetic(node)
    }

    fn expr(node: Expr) -> Spanned<Expr> {
        Spanned::synthetic(node)
    }

    #[test]
    fn empty_module_emits_nothing() {
        assert_eq!(Emitter::new().emit(&Module::default()).unwrap(), "");
    }

    #[test]
    fn declaration_then_assignment() {
        let module = Module {
            body: vec![
                stmt(Stmt::AnnAssign(AnnAssign {
                    target: expr(Expr::name("x")),
                    annotation: expr(Expr::name("int")),
                    value: Some(expr(Expr::int(5))),
                })),
                stmt(Stmt::Assign(Assign {
                    targets: vec![expr(Expr::name("x"))],
                    value: expr(Expr::BinOp(
                        Box::new(expr(Expr::name("x"))),
                        pytircy_syntax::ast::BinOpKind::Add,
                        Box::new(expr(Expr::int(1))),
                    )),
                })),
            ],
        };
        let mut emitter = Emitter::new();
        let out = emitter.emit(&module).unwrap();
        assert_eq!(out, "int x = 5;\nx = (x + 1);\n");
        assert_eq!(emitter.declared(), ["x".to_string()]);
    }

    #[test]
    fn import_block_gets_no_terminator() {
        let module = Module {
            body: vec![
                stmt(Stmt::Import(vec![ImportAlias::new("vector")])),
                stmt(Stmt::Expr(expr(Expr::Call {
                    func: Box::new(expr(Expr::name("f"))),
                    args: vec![],
                    keywords: vec![],
                }))),
            ],
        };
        assert_eq!(Emitter::new().emit(&module).unwrap(), "#include <vector>\nf();\n");
    }

    #[test]
    fn declarations_do_not_leak_between_runs() {
        let declare = Module {
            body: vec![stmt(Stmt::AnnAssign(AnnAssign {
                target: expr(Expr::name("x")),
                annotation: expr(Expr::name("int")),
                value: None,
            }))],
        };
        let assign = Module {
            body: vec![stmt(Stmt::Assign(Assign {
                targets: vec![expr(Expr::name("x"))],
                value: expr(Expr::int(1)),
            }))],
        };

        let mut emitter = Emitter::new();
        emitter.emit(&declare).unwrap();
        assert_eq!(
            emitter.emit(&assign),
            Err(EmitError::UndeclaredVariable { name: "x".to_string() })
        );
    }

    #[test]
    fn fragment_constructors_set_termination() {
        assert_eq!(Fragment::statement("x").terminated, Termination::Statement);
        assert_eq!(Fragment::block("y").terminated, Termination::Block);
    }
}

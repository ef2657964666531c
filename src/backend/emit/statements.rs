//! Statement emission: dispatch, assignments, conditionals and `return`.

use pytircy_syntax::ast::{Assign, Expr, IfStmt, Spanned, Stmt};

use super::{EmitError, Emitter, Fragment};

impl Emitter {
    pub(super) fn emit_stmt(&mut self, stmt: &Stmt) -> Result<Fragment, EmitError> {
        match stmt {
            Stmt::Expr(expr) => Ok(Fragment::statement(self.emit_expr(expr)?)),
            Stmt::AnnAssign(decl) => self.emit_ann_assign(decl),
            Stmt::Assign(assign) => self.emit_assign(assign),
            Stmt::If(if_stmt) => self.emit_if(if_stmt),
            Stmt::FunctionDef(def) => self.emit_function_def(def),
            Stmt::Return(value) => match value {
                Some(value) => Ok(Fragment::statement(format!("return {}", self.emit_expr(value)?))),
                None => Ok(Fragment::statement("return")),
            },
            Stmt::Import(names) => self.emit_import(names),
            Stmt::AugAssign(_)
            | Stmt::While(_)
            | Stmt::For(_)
            | Stmt::ImportFrom(_)
            | Stmt::Pass
            | Stmt::Break
            | Stmt::Continue => Err(EmitError::UnsupportedConstruct {
                kind: stmt.kind_name(),
            }),
        }
    }

    /// `T1 = T2 = VALUE`. Every named target must have been declared earlier in the run.
    fn emit_assign(&mut self, assign: &Assign) -> Result<Fragment, EmitError> {
        for target in &assign.targets {
            if let Some(name) = checked_name(&target.node) {
                if !self.is_declared(name) {
                    return Err(EmitError::UndeclaredVariable { name: name.to_string() });
                }
            }
        }

        let mut parts = Vec::with_capacity(assign.targets.len() + 1);
        for target in &assign.targets {
            parts.push(self.emit_target(target)?);
        }
        parts.push(self.emit_expr(&assign.value)?);
        Ok(Fragment::statement(parts.join(" = ")))
    }

    /// Render an assignment target. Attribute chains are allowed here (and only here) as `base.attr`.
    fn emit_target(&mut self, target: &Spanned<Expr>) -> Result<String, EmitError> {
        match &target.node {
            Expr::Attribute(base, attr) => Ok(format!("{}.{}", self.emit_target(base)?, attr)),
            _ => self.emit_expr(target),
        }
    }

    /// `if (COND) {\nBODY} else {\nORELSE}`; the else block is emitted even when empty.
    fn emit_if(&mut self, if_stmt: &IfStmt) -> Result<Fragment, EmitError> {
        let test = self.emit_expr(&if_stmt.test)?;
        let body = self.join_sequence(&if_stmt.body)?;
        let orelse = self.join_sequence(&if_stmt.orelse)?;
        Ok(Fragment::block(format!(
            "if ({}) {{\n{}}} else {{\n{}}}",
            test, body, orelse
        )))
    }
}

/// The name an assignment target must have declared: the name itself, or the root of an attribute chain
/// (`p` for `p.x.y`). Subscript targets and attribute chains on other roots are not checked.
fn checked_name(target: &Expr) -> Option<&str> {
    match target {
        Expr::Name(id) => Some(id.as_str()),
        Expr::Attribute(base, _) => match &base.node {
            Expr::Name(id) => Some(id.as_str()),
            inner @ Expr::Attribute(..) => checked_name(inner),
            _ => None,
        },
        _ => None,
    }
}

//! Expression emission.
//!
//! Binary operations and comparisons are always fully parenthesised, so the output never depends on C++ operator
//! precedence.

use pytircy_syntax::ast::{BinOpKind, CmpOp, Constant, Expr, Spanned};

use super::literals::emit_constant;
use super::{EmitError, Emitter};

impl Emitter {
    pub(super) fn emit_expr(&mut self, expr: &Spanned<Expr>) -> Result<String, EmitError> {
        match &expr.node {
            Expr::Constant(constant) => emit_constant(constant),
            Expr::Name(id) => Ok(id.clone()),
            Expr::BinOp(left, op, right) => {
                let op = binary_op(*op)?;
                let left = self.emit_expr(left)?;
                let right = self.emit_expr(right)?;
                Ok(format!("({} {} {})", left, op, right))
            }
            Expr::Compare {
                left,
                ops,
                comparators,
            } => self.emit_compare(left, ops, comparators),
            Expr::Call { func, args, keywords } => {
                if !keywords.is_empty() {
                    return Err(EmitError::UnsupportedConstruct {
                        kind: "keyword argument",
                    });
                }
                let func = self.emit_expr(func)?;
                let args = self.emit_list(args)?;
                Ok(format!("{}({})", func, args))
            }
            Expr::List(items) => Ok(format!("{{{}}}", self.emit_list(items)?)),
            Expr::Subscript(base, index) => {
                let Expr::Constant(Constant::Int(i)) = index.node else {
                    return Err(EmitError::UnsupportedSubscript {
                        found: describe(&index.node),
                    });
                };
                let base = self.emit_expr(base)?;
                Ok(format!("{}[{}]", base, i))
            }
            Expr::Attribute(..)
            | Expr::UnaryOp(..)
            | Expr::BoolOp(..)
            | Expr::Slice { .. }
            | Expr::Tuple(_)
            | Expr::Dict(_) => Err(EmitError::UnsupportedConstruct {
                kind: expr.node.kind_name(),
            }),
        }
    }

    /// `(left OP right)` for exactly one comparison operator.
    fn emit_compare(
        &mut self,
        left: &Spanned<Expr>,
        ops: &[CmpOp],
        comparators: &[Spanned<Expr>],
    ) -> Result<String, EmitError> {
        let ([op], [right]) = (ops, comparators) else {
            return Err(EmitError::UnsupportedChainedComparison { count: ops.len() });
        };
        let op = comparison_op(*op)?;
        let left = self.emit_expr(left)?;
        let right = self.emit_expr(right)?;
        Ok(format!("({} {} {})", left, op, right))
    }

    /// Comma-separated expressions, left to right.
    fn emit_list(&mut self, items: &[Spanned<Expr>]) -> Result<String, EmitError> {
        let parts = items
            .iter()
            .map(|item| self.emit_expr(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }
}

fn binary_op(op: BinOpKind) -> Result<&'static str, EmitError> {
    match op {
        BinOpKind::Add => Ok("+"),
        BinOpKind::Sub => Ok("-"),
        BinOpKind::Mult => Ok("*"),
        BinOpKind::Div => Ok("/"),
        BinOpKind::Mod => Ok("%"),
        BinOpKind::FloorDiv
        | BinOpKind::Pow
        | BinOpKind::MatMult
        | BinOpKind::BitAnd
        | BinOpKind::BitOr
        | BinOpKind::BitXor
        | BinOpKind::LShift
        | BinOpKind::RShift => Err(EmitError::UnsupportedOperator { op: op.to_string() }),
    }
}

fn comparison_op(op: CmpOp) -> Result<&'static str, EmitError> {
    match op {
        CmpOp::Eq => Ok("=="),
        CmpOp::NotEq => Ok("!="),
        CmpOp::GtE => Ok(">="),
        CmpOp::Gt => Ok(">"),
        CmpOp::LtE => Ok("<="),
        CmpOp::Lt => Ok("<"),
        CmpOp::In | CmpOp::NotIn | CmpOp::Is | CmpOp::IsNot => {
            Err(EmitError::UnsupportedOperator { op: op.to_string() })
        }
    }
}

/// Short description of an expression for messages: the literal's type for constants, the node kind otherwise.
pub(super) fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::Constant(constant) => constant.type_name(),
        other => other.kind_name(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pytircy_syntax::ast::{Keyword, UnaryOpKind};

    fn e(node: Expr) -> Spanned<Expr> {
        Spanned::synthetic(node)
    }

    fn bin(left: Expr, op: BinOpKind, right: Expr) -> Expr {
        Expr::BinOp(Box::new(e(left)), op, Box::new(e(right)))
    }

    fn cmp(left: Expr, ops: Vec<CmpOp>, comparators: Vec<Expr>) -> Expr {
        Expr::Compare {
            left: Box::new(e(left)),
            ops,
            comparators: comparators.into_iter().map(e).collect(),
        }
    }

    fn emit(node: Expr) -> Result<String, EmitError> {
        Emitter::new().emit_expr(&e(node))
    }

    #[test]
    fn supported_binary_operators_are_parenthesised() {
        for (op, text) in [
            (BinOpKind::Add, "+"),
            (BinOpKind::Sub, "-"),
            (BinOpKind::Mult, "*"),
            (BinOpKind::Div, "/"),
            (BinOpKind::Mod, "%"),
        ] {
            let out = emit(bin(Expr::name("a"), op, Expr::int(2))).unwrap();
            assert_eq!(out, format!("(a {} 2)", text));
        }
    }

    #[test]
    fn nested_binary_operations_keep_tree_shape() {
        let tree = bin(
            Expr::int(1),
            BinOpKind::Add,
            bin(Expr::int(2), BinOpKind::Mult, Expr::int(3)),
        );
        assert_eq!(emit(tree).unwrap(), "(1 + (2 * 3))");
    }

    #[test]
    fn unsupported_binary_operator() {
        assert_eq!(
            emit(bin(Expr::int(2), BinOpKind::Pow, Expr::int(3))),
            Err(EmitError::UnsupportedOperator { op: "**".to_string() })
        );
        assert_eq!(
            emit(bin(Expr::int(7), BinOpKind::FloorDiv, Expr::int(2))),
            Err(EmitError::UnsupportedOperator { op: "//".to_string() })
        );
    }

    #[test]
    fn single_comparisons() {
        for (op, text) in [
            (CmpOp::Eq, "=="),
            (CmpOp::NotEq, "!="),
            (CmpOp::GtE, ">="),
            (CmpOp::Gt, ">"),
            (CmpOp::LtE, "<="),
            (CmpOp::Lt, "<"),
        ] {
            let out = emit(cmp(Expr::name("x"), vec![op], vec![Expr::int(0)])).unwrap();
            assert_eq!(out, format!("(x {} 0)", text));
        }
    }

    #[test]
    fn chained_comparison_fails_before_operator_check() {
        let tree = cmp(
            Expr::name("a"),
            vec![CmpOp::In, CmpOp::Lt],
            vec![Expr::name("b"), Expr::name("c")],
        );
        assert_eq!(
            emit(tree),
            Err(EmitError::UnsupportedChainedComparison { count: 2 })
        );
    }

    #[test]
    fn membership_and_identity_comparisons_are_rejected() {
        assert_eq!(
            emit(cmp(Expr::name("a"), vec![CmpOp::NotIn], vec![Expr::name("b")])),
            Err(EmitError::UnsupportedOperator {
                op: "not in".to_string()
            })
        );
    }

    #[test]
    fn call_and_list() {
        let call = Expr::Call {
            func: Box::new(e(Expr::name("printf"))),
            args: vec![e(Expr::str("%d")), e(Expr::name("x"))],
            keywords: vec![],
        };
        assert_eq!(emit(call).unwrap(), "printf(\"%d\", x)");
        assert_eq!(
            emit(Expr::List(vec![e(Expr::int(1)), e(Expr::int(2)), e(Expr::int(3))])).unwrap(),
            "{1, 2, 3}"
        );
        assert_eq!(emit(Expr::List(vec![])).unwrap(), "{}");
    }

    #[test]
    fn keyword_arguments_are_rejected() {
        let call = Expr::Call {
            func: Box::new(e(Expr::name("f"))),
            args: vec![],
            keywords: vec![Spanned::synthetic(Keyword {
                arg: "end".to_string(),
                value: e(Expr::str("")),
            })],
        };
        assert_eq!(
            emit(call),
            Err(EmitError::UnsupportedConstruct {
                kind: "keyword argument"
            })
        );
    }

    #[test]
    fn subscript_requires_integer_literal() {
        let ok = Expr::Subscript(Box::new(e(Expr::name("v"))), Box::new(e(Expr::int(3))));
        assert_eq!(emit(ok).unwrap(), "v[3]");

        let by_name = Expr::Subscript(Box::new(e(Expr::name("v"))), Box::new(e(Expr::name("i"))));
        assert_eq!(emit(by_name), Err(EmitError::UnsupportedSubscript { found: "Name" }));

        let by_bool = Expr::Subscript(
            Box::new(e(Expr::name("v"))),
            Box::new(e(Expr::Constant(Constant::Bool(true)))),
        );
        assert_eq!(emit(by_bool), Err(EmitError::UnsupportedSubscript { found: "bool" }));
    }

    #[test]
    fn unsupported_expression_kinds() {
        let neg = Expr::UnaryOp(UnaryOpKind::USub, Box::new(e(Expr::int(5))));
        assert_eq!(emit(neg), Err(EmitError::UnsupportedConstruct { kind: "UnaryOp" }));

        let attr = Expr::Attribute(Box::new(e(Expr::name("p"))), "x".to_string());
        assert_eq!(emit(attr), Err(EmitError::UnsupportedConstruct { kind: "Attribute" }));

        assert_eq!(
            emit(Expr::Tuple(vec![])),
            Err(EmitError::UnsupportedConstruct { kind: "Tuple" })
        );
    }
}

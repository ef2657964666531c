//! Property-based tests for the Pytircy compiler
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use pytircy::ast::{
    AnnAssign, Assign, BinOpKind, CmpOp, Constant, Expr, FunctionDef, Module, Param, Spanned, Stmt,
};
use pytircy::{EmitError, compile_source, emit_module};
use pytircy_core::lang::keywords;

fn e(node: Expr) -> Spanned<Expr> {
    Spanned::synthetic(node)
}

fn s(node: Stmt) -> Spanned<Stmt> {
    Spanned::synthetic(node)
}

/// Emit a single expression statement and strip its `;\n` terminator.
fn emit_expr_stmt(expr: Expr) -> Result<String, EmitError> {
    let out = emit_module(&Module {
        body: vec![s(Stmt::Expr(e(expr)))],
    })?;
    Ok(out.trim_end_matches('\n').trim_end_matches(';').to_string())
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("not a keyword", |name| keywords::from_str(name).is_none())
}

fn binary_op() -> impl Strategy<Value = (BinOpKind, &'static str)> {
    prop_oneof![
        Just((BinOpKind::Add, "+")),
        Just((BinOpKind::Sub, "-")),
        Just((BinOpKind::Mult, "*")),
        Just((BinOpKind::Div, "/")),
        Just((BinOpKind::Mod, "%")),
    ]
}

fn comparison_op() -> impl Strategy<Value = (CmpOp, &'static str)> {
    prop_oneof![
        Just((CmpOp::Eq, "==")),
        Just((CmpOp::NotEq, "!=")),
        Just((CmpOp::Lt, "<")),
        Just((CmpOp::LtE, "<=")),
        Just((CmpOp::Gt, ">")),
        Just((CmpOp::GtE, ">=")),
    ]
}

// =============================================================================
// Literal Properties
// =============================================================================

proptest! {
    /// Property: integer literals read back as the same value
    #[test]
    fn int_literal_round_trips(value in any::<i64>()) {
        let text = emit_expr_stmt(Expr::Constant(Constant::Int(value))).unwrap();
        prop_assert_eq!(text.parse::<i64>().unwrap(), value);
    }

    /// Property: non-negative integers survive the whole source pipeline
    #[test]
    fn int_source_round_trips(value in 0..=i64::MAX) {
        let cpp = compile_source(&format!("x: int = {}\n", value)).unwrap();
        prop_assert_eq!(cpp, format!("int x = {};\n", value));
    }

    /// Property: finite float literals read back as the same value and always look like a double
    #[test]
    fn float_literal_round_trips(value in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let text = emit_expr_stmt(Expr::Constant(Constant::Float(value))).unwrap();
        prop_assert!(text.contains('.') || text.contains('e'), "not a double literal: {}", text);
        prop_assert_eq!(text.parse::<f64>().unwrap(), value);
    }

    /// Property: booleans emit as C++ keywords
    #[test]
    fn bool_literal_round_trips(value in any::<bool>()) {
        let text = emit_expr_stmt(Expr::Constant(Constant::Bool(value))).unwrap();
        prop_assert_eq!(text.parse::<bool>().unwrap(), value);
    }
}

// =============================================================================
// Declaration Properties
// =============================================================================

proptest! {
    /// Property: a declared name can always be assigned afterwards
    #[test]
    fn declared_then_assigned_never_undeclared(name in identifier(), value in 0..1000i64) {
        let source = format!("{name}: int = 0\n{name} = {value}\n");
        let cpp = compile_source(&source).unwrap();
        prop_assert_eq!(cpp, format!("int {name} = 0;\n{name} = {value};\n"));
    }

    /// Property: assigning a name with no prior declaration always fails
    #[test]
    fn undeclared_assignment_always_fails(name in identifier(), other in identifier()) {
        prop_assume!(name != other);
        let module = Module {
            body: vec![
                s(Stmt::AnnAssign(AnnAssign {
                    target: e(Expr::name(other.as_str())),
                    annotation: e(Expr::name("int")),
                    value: None,
                })),
                s(Stmt::Assign(Assign {
                    targets: vec![e(Expr::name(name.as_str()))],
                    value: e(Expr::int(1)),
                })),
            ],
        };
        prop_assert_eq!(emit_module(&module), Err(EmitError::UndeclaredVariable { name }));
    }
}

// =============================================================================
// Operator Properties
// =============================================================================

proptest! {
    /// Property: every supported binary operator is emitted fully parenthesised
    #[test]
    fn binary_operations_are_parenthesised((op, text) in binary_op(), l in identifier(), r in identifier()) {
        let tree = Expr::BinOp(Box::new(e(Expr::name(l.as_str()))), op, Box::new(e(Expr::name(r.as_str()))));
        prop_assert_eq!(emit_expr_stmt(tree).unwrap(), format!("({} {} {})", l, text, r));
    }

    /// Property: every single comparison is emitted fully parenthesised
    #[test]
    fn comparisons_are_parenthesised((op, text) in comparison_op(), l in identifier(), r in -50..50i64) {
        let tree = Expr::Compare {
            left: Box::new(e(Expr::name(l.as_str()))),
            ops: vec![op],
            comparators: vec![e(Expr::int(r))],
        };
        prop_assert_eq!(emit_expr_stmt(tree).unwrap(), format!("({} {} {})", l, text, r));
    }

    /// Property: two or more comparison operators always fail, whatever the operators are
    #[test]
    fn chained_comparisons_always_fail(ops in prop::collection::vec(comparison_op(), 2..6)) {
        let count = ops.len();
        let tree = Expr::Compare {
            left: Box::new(e(Expr::int(0))),
            ops: ops.into_iter().map(|(op, _)| op).collect(),
            comparators: (0..count as i64).map(|i| e(Expr::int(i))).collect(),
        };
        prop_assert_eq!(emit_expr_stmt(tree), Err(EmitError::UnsupportedChainedComparison { count }));
    }
}

// =============================================================================
// Function Properties
// =============================================================================

proptest! {
    /// Property: any parameter without a type fails with MissingParameterType naming the first such parameter,
    /// whatever the other parameters and the return type look like
    #[test]
    fn unannotated_parameter_always_fails(
        annotated in prop::collection::vec(any::<bool>(), 1..6),
        missing_at in any::<prop::sample::Index>(),
        has_return in any::<bool>(),
    ) {
        let mut annotated = annotated;
        let forced = missing_at.index(annotated.len());
        annotated[forced] = false;

        let params = annotated
            .iter()
            .enumerate()
            .map(|(i, has_type)| {
                Spanned::synthetic(Param {
                    name: format!("p{}", i),
                    annotation: has_type.then(|| e(Expr::name("int"))),
                })
            })
            .collect();
        let def = FunctionDef {
            name: "f".to_string(),
            params,
            returns: has_return.then(|| e(Expr::name("int"))),
            body: vec![],
        };
        let first_missing = annotated.iter().position(|has_type| !has_type).unwrap();

        prop_assert_eq!(
            emit_module(&Module { body: vec![s(Stmt::FunctionDef(def))] }),
            Err(EmitError::MissingParameterType {
                function: "f".to_string(),
                param: format!("p{}", first_missing),
            })
        );
    }
}

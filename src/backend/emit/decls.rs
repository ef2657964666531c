//! Declaration emission: annotated variables, function definitions and `#include` imports.
//!
//! These are the handlers that validate shape before emitting anything: a bad annotation, a missing parameter
//! type or an aliased import fails the run instead of producing C++ that would not compile.

use pytircy_syntax::ast::{AnnAssign, Expr, FunctionDef, ImportAlias};

use super::expressions::describe;
use super::{EmitError, Emitter, Fragment};

impl Emitter {
    /// `TYPE TARGET [= VALUE]`, declaring the target's name for later assignments.
    pub(super) fn emit_ann_assign(&mut self, decl: &AnnAssign) -> Result<Fragment, EmitError> {
        let Expr::Name(ty) = &decl.annotation.node else {
            return Err(EmitError::InvalidTypeAnnotation {
                found: describe(&decl.annotation.node),
            });
        };
        if !matches!(decl.target.node, Expr::Name(_) | Expr::Subscript(..)) {
            return Err(EmitError::InvalidDeclarationTarget {
                found: describe(&decl.target.node),
            });
        }

        let head = format!("{} {}", ty, self.emit_expr(&decl.target)?);
        // The declared name is the token after the type: `x` for `int x`, `v[3]` for `int v[3]`.
        if let Some(name) = head.split_whitespace().nth(1) {
            self.declare(name);
        }

        match &decl.value {
            Some(value) => {
                let value = self.emit_expr(value)?;
                Ok(Fragment::statement(format!("{} = {}", head, value)))
            }
            None => Ok(Fragment::statement(head)),
        }
    }

    /// `RET NAME(T1 A1, T2 A2) {\nBODY}`.
    pub(super) fn emit_function_def(&mut self, def: &FunctionDef) -> Result<Fragment, EmitError> {
        if let Some(param) = def.params.iter().find(|p| p.node.annotation.is_none()) {
            return Err(EmitError::MissingParameterType {
                function: def.name.clone(),
                param: param.node.name.clone(),
            });
        }
        let Some(returns) = &def.returns else {
            return Err(EmitError::MissingReturnType {
                function: def.name.clone(),
            });
        };
        let Expr::Name(ret) = &returns.node else {
            return Err(EmitError::InvalidReturnType {
                function: def.name.clone(),
                found: describe(&returns.node),
            });
        };

        let mut params = Vec::with_capacity(def.params.len());
        for param in &def.params {
            if let Some(annotation) = &param.node.annotation {
                params.push(format!("{} {}", self.emit_expr(annotation)?, param.node.name));
            }
        }
        let body = self.join_sequence(&def.body)?;

        Ok(Fragment::block(format!(
            "{} {}({}) {{\n{}}}",
            ret,
            def.name,
            params.join(", "),
            body
        )))
    }

    /// `#include <NAME>` for a single, un-aliased module.
    pub(super) fn emit_import(&mut self, names: &[ImportAlias]) -> Result<Fragment, EmitError> {
        let [alias] = names else {
            return Err(EmitError::MultiImportUnsupported { count: names.len() });
        };
        if let Some(asname) = &alias.asname {
            return Err(EmitError::ImportAliasUnsupported {
                module: alias.name.clone(),
                alias: asname.clone(),
            });
        }
        Ok(Fragment::block(format!("#include <{}>", alias.name)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pytircy_syntax::ast::{BinOpKind, Module, Param, Spanned, Stmt};

    fn e(node: Expr) -> Spanned<Expr> {
        Spanned::synthetic(node)
    }

    fn ann(target: Expr, ty: Expr, value: Option<Expr>) -> AnnAssign {
        AnnAssign {
            target: e(target),
            annotation: e(ty),
            value: value.map(e),
        }
    }

    fn param(name: &str, ty: Option<&str>) -> Spanned<Param> {
        Spanned::synthetic(Param {
            name: name.to_string(),
            annotation: ty.map(|t| e(Expr::name(t))),
        })
    }

    fn def(params: Vec<Spanned<Param>>, returns: Option<Expr>, body: Vec<Stmt>) -> FunctionDef {
        FunctionDef {
            name: "add".to_string(),
            params,
            returns: returns.map(e),
            body: body.into_iter().map(Spanned::synthetic).collect(),
        }
    }

    #[test]
    fn declaration_with_and_without_value() {
        let mut emitter = Emitter::new();
        let with = emitter
            .emit_ann_assign(&ann(Expr::name("x"), Expr::name("int"), Some(Expr::int(5))))
            .unwrap();
        assert_eq!(with, Fragment::statement("int x = 5"));
        let without = emitter
            .emit_ann_assign(&ann(Expr::name("y"), Expr::name("double"), None))
            .unwrap();
        assert_eq!(without, Fragment::statement("double y"));
        assert_eq!(emitter.declared(), ["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn subscript_declaration_records_rendered_target() {
        let target = Expr::Subscript(Box::new(e(Expr::name("x"))), Box::new(e(Expr::int(3))));
        let value = Expr::List(vec![e(Expr::int(1)), e(Expr::int(2)), e(Expr::int(3))]);
        let mut emitter = Emitter::new();
        let out = emitter
            .emit_ann_assign(&ann(target, Expr::name("int"), Some(value)))
            .unwrap();
        assert_eq!(out.text, "int x[3] = {1, 2, 3}");
        assert_eq!(emitter.declared(), ["x[3]".to_string()]);
    }

    #[test]
    fn declared_before_initializer_is_rendered() {
        // `x: int = x` is accepted: the name is recorded before the value is visited.
        let mut emitter = Emitter::new();
        let out = emitter
            .emit_ann_assign(&ann(Expr::name("x"), Expr::name("int"), Some(Expr::name("x"))))
            .unwrap();
        assert_eq!(out.text, "int x = x");
    }

    #[test]
    fn composite_annotation_is_rejected() {
        let ty = Expr::Subscript(Box::new(e(Expr::name("list"))), Box::new(e(Expr::name("int"))));
        assert_eq!(
            Emitter::new().emit_ann_assign(&ann(Expr::name("x"), ty, None)),
            Err(EmitError::InvalidTypeAnnotation { found: "Subscript" })
        );
    }

    #[test]
    fn attribute_declaration_target_is_rejected() {
        let target = Expr::Attribute(Box::new(e(Expr::name("p"))), "x".to_string());
        let mut emitter = Emitter::new();
        assert_eq!(
            emitter.emit_ann_assign(&ann(target, Expr::name("int"), None)),
            Err(EmitError::InvalidDeclarationTarget { found: "Attribute" })
        );
        assert!(emitter.declared().is_empty());
    }

    #[test]
    fn function_definition() {
        let body = vec![Stmt::Return(Some(e(Expr::BinOp(
            Box::new(e(Expr::name("a"))),
            BinOpKind::Add,
            Box::new(e(Expr::name("b"))),
        ))))];
        let f = def(
            vec![param("a", Some("int")), param("b", Some("int"))],
            Some(Expr::name("int")),
            body,
        );
        let out = Emitter::new().emit_function_def(&f).unwrap();
        assert_eq!(out, Fragment::block("int add(int a, int b) {\nreturn (a + b);\n}"));
    }

    #[test]
    fn function_with_no_params_or_body() {
        let f = def(vec![], Some(Expr::name("void")), vec![]);
        assert_eq!(Emitter::new().emit_function_def(&f).unwrap().text, "void add() {\n}");
    }

    #[test]
    fn missing_parameter_type_names_the_parameter() {
        let f = def(
            vec![param("a", Some("int")), param("b", None)],
            None,
            vec![],
        );
        // Parameter types are checked before the return type.
        assert_eq!(
            Emitter::new().emit_function_def(&f),
            Err(EmitError::MissingParameterType {
                function: "add".to_string(),
                param: "b".to_string()
            })
        );
    }

    #[test]
    fn missing_and_invalid_return_type() {
        let f = def(vec![param("a", Some("int"))], None, vec![]);
        assert_eq!(
            Emitter::new().emit_function_def(&f),
            Err(EmitError::MissingReturnType {
                function: "add".to_string()
            })
        );

        let ret = Expr::Subscript(Box::new(e(Expr::name("list"))), Box::new(e(Expr::name("int"))));
        let f = def(vec![], Some(ret), vec![]);
        assert_eq!(
            Emitter::new().emit_function_def(&f),
            Err(EmitError::InvalidReturnType {
                function: "add".to_string(),
                found: "Subscript"
            })
        );
    }

    #[test]
    fn function_body_declarations_are_visible_afterwards() {
        // One flat name set: there are no scopes.
        let body = vec![Stmt::AnnAssign(ann(Expr::name("t"), Expr::name("int"), None))];
        let f = def(vec![], Some(Expr::name("void")), body);
        let module = Module {
            body: vec![
                Spanned::synthetic(Stmt::FunctionDef(f)),
                Spanned::synthetic(Stmt::Assign(pytircy_syntax::ast::Assign {
                    targets: vec![e(Expr::name("t"))],
                    value: e(Expr::int(1)),
                })),
            ],
        };
        assert_eq!(
            Emitter::new().emit(&module).unwrap(),
            "void add() {\nint t;\n}\nt = 1;\n"
        );
    }

    #[test]
    fn imports() {
        let mut emitter = Emitter::new();
        assert_eq!(
            emitter.emit_import(&[ImportAlias::new("vector")]).unwrap(),
            Fragment::block("#include <vector>")
        );
        assert_eq!(
            emitter.emit_import(&[ImportAlias::new("a"), ImportAlias::new("b")]),
            Err(EmitError::MultiImportUnsupported { count: 2 })
        );
        let aliased = ImportAlias {
            name: "numpy".to_string(),
            asname: Some("np".to_string()),
        };
        assert_eq!(
            emitter.emit_import(&[aliased]),
            Err(EmitError::ImportAliasUnsupported {
                module: "numpy".to_string(),
                alias: "np".to_string()
            })
        );
    }
}

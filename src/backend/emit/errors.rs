//! Define error types for tree → C++ emission.
//!
//! These errors represent *backend emission* failures (as opposed to lexing or parsing). Each variant names one
//! construct or shape the emitter refuses; the first one encountered aborts the run.
//!
//! ## Notes
//!
//! - Messages say what was found; the `help` text says what the emitter accepts instead.

use miette::Diagnostic;
use thiserror::Error;

/// Error during emission.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EmitError {
    #[error("unsupported construct: {kind}")]
    #[diagnostic(
        code(pytircy::emit::unsupported_construct),
        help("supported statements: expressions, annotated declarations, assignments, if/else, def, return, import")
    )]
    UnsupportedConstruct { kind: &'static str },

    #[error("unsupported literal type: {type_name}")]
    #[diagnostic(
        code(pytircy::emit::unsupported_literal_type),
        help("only str, int, float and bool literals can be emitted")
    )]
    UnsupportedLiteralType { type_name: &'static str },

    #[error("char literal must hold a single character, got {value:?}")]
    #[diagnostic(
        code(pytircy::emit::invalid_char_literal),
        help("drop the `u` prefix to emit a string literal")
    )]
    InvalidCharLiteral { value: String },

    #[error("unsupported operator: {op}")]
    #[diagnostic(
        code(pytircy::emit::unsupported_operator),
        help("supported operators: + - * / % and comparisons == != < <= > >=")
    )]
    UnsupportedOperator { op: String },

    #[error("chained comparisons are not supported ({count} operators)")]
    #[diagnostic(
        code(pytircy::emit::unsupported_chained_comparison),
        help("split the chain into single comparisons")
    )]
    UnsupportedChainedComparison { count: usize },

    #[error("type annotation must be a plain name, found {found}")]
    #[diagnostic(code(pytircy::emit::invalid_type_annotation))]
    InvalidTypeAnnotation { found: &'static str },

    #[error("declaration target must be a name or a subscript, found {found}")]
    #[diagnostic(code(pytircy::emit::invalid_declaration_target))]
    InvalidDeclarationTarget { found: &'static str },

    #[error("assignment to undeclared variable '{name}'")]
    #[diagnostic(
        code(pytircy::emit::undeclared_variable),
        help("declare the name first with an annotated assignment such as `x: int = 0`")
    )]
    UndeclaredVariable { name: String },

    #[error("parameter '{param}' of function '{function}' has no type annotation")]
    #[diagnostic(code(pytircy::emit::missing_parameter_type))]
    MissingParameterType { function: String, param: String },

    #[error("function '{function}' has no return type annotation")]
    #[diagnostic(
        code(pytircy::emit::missing_return_type),
        help("add `-> TYPE` to the signature")
    )]
    MissingReturnType { function: String },

    #[error("return type of function '{function}' must be a plain name, found {found}")]
    #[diagnostic(code(pytircy::emit::invalid_return_type))]
    InvalidReturnType { function: String, found: &'static str },

    #[error("an import must name exactly one module, found {count}")]
    #[diagnostic(
        code(pytircy::emit::multi_import_unsupported),
        help("write one `import` statement per header")
    )]
    MultiImportUnsupported { count: usize },

    #[error("import aliases are not supported ('{module}' as '{alias}')")]
    #[diagnostic(code(pytircy::emit::import_alias_unsupported))]
    ImportAliasUnsupported { module: String, alias: String },

    #[error("subscript index must be an integer literal, found {found}")]
    #[diagnostic(code(pytircy::emit::unsupported_subscript))]
    UnsupportedSubscript { found: &'static str },
}

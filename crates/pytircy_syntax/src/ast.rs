//! Abstract Syntax Tree definitions for the Pytircy source language
//!
//! The tree mirrors the shape of the Python grammar productions it was parsed from. It is deliberately wider than
//! what the emitter lowers: `While`, `Attribute`, `UnaryOp` and friends exist so the emitter can reject them by name.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Wrap a node that has no source text behind it (hand-built trees, tests).
    pub fn synthetic(node: T) -> Self {
        Self {
            node,
            span: Span::default(),
        }
    }
}

pub type Ident = String;

/// A parsed source file: an ordered statement sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Spanned<Stmt>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its effect, e.g. `print(x)`
    Expr(Spanned<Expr>),
    /// `target: annotation [= value]`
    AnnAssign(AnnAssign),
    /// `t1 = t2 = value`
    Assign(Assign),
    /// `target += value`
    AugAssign(AugAssign),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    FunctionDef(FunctionDef),
    Return(Option<Spanned<Expr>>),
    /// `import a, b.c as d`
    Import(Vec<ImportAlias>),
    /// `from module import name`
    ImportFrom(ImportFrom),
    Pass,
    Break,
    Continue,
}

impl Stmt {
    /// Name of the grammar production, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Expr(_) => "Expr",
            Stmt::AnnAssign(_) => "AnnAssign",
            Stmt::Assign(_) => "Assign",
            Stmt::AugAssign(_) => "AugAssign",
            Stmt::If(_) => "If",
            Stmt::While(_) => "While",
            Stmt::For(_) => "For",
            Stmt::FunctionDef(_) => "FunctionDef",
            Stmt::Return(_) => "Return",
            Stmt::Import(_) => "Import",
            Stmt::ImportFrom(_) => "ImportFrom",
            Stmt::Pass => "Pass",
            Stmt::Break => "Break",
            Stmt::Continue => "Continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnAssign {
    pub target: Spanned<Expr>,
    pub annotation: Spanned<Expr>,
    pub value: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub targets: Vec<Spanned<Expr>>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugAssign {
    pub target: Spanned<Expr>,
    pub op: BinOpKind,
    pub value: Spanned<Expr>,
}

/// `if test: body else: orelse`. An `elif` chain is a nested `If` as the only statement of `orelse`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Spanned<Expr>,
    pub body: Vec<Spanned<Stmt>>,
    pub orelse: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Spanned<Expr>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub target: Spanned<Expr>,
    pub iter: Spanned<Expr>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<Spanned<Param>>,
    pub returns: Option<Spanned<Expr>>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub annotation: Option<Spanned<Expr>>,
}

/// One name in an `import` statement. `name` keeps its dots (`os.path`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportAlias {
    pub name: String,
    pub asname: Option<Ident>,
}

impl ImportAlias {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asname: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportFrom {
    pub module: String,
    pub names: Vec<ImportAlias>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    Name(Ident),
    BinOp(Box<Spanned<Expr>>, BinOpKind, Box<Spanned<Expr>>),
    UnaryOp(UnaryOpKind, Box<Spanned<Expr>>),
    BoolOp(BoolOpKind, Vec<Spanned<Expr>>),
    /// `left op1 c1 op2 c2 ...`; `ops` and `comparators` have the same length.
    Compare {
        left: Box<Spanned<Expr>>,
        ops: Vec<CmpOp>,
        comparators: Vec<Spanned<Expr>>,
    },
    Call {
        func: Box<Spanned<Expr>>,
        args: Vec<Spanned<Expr>>,
        keywords: Vec<Spanned<Keyword>>,
    },
    Attribute(Box<Spanned<Expr>>, Ident),
    Subscript(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `lower:upper:step` inside a subscript
    Slice {
        lower: Option<Box<Spanned<Expr>>>,
        upper: Option<Box<Spanned<Expr>>>,
        step: Option<Box<Spanned<Expr>>>,
    },
    List(Vec<Spanned<Expr>>),
    Tuple(Vec<Spanned<Expr>>),
    Dict(Vec<(Spanned<Expr>, Spanned<Expr>)>),
}

impl Expr {
    /// Name of the grammar production, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Constant(_) => "Constant",
            Expr::Name(_) => "Name",
            Expr::BinOp(..) => "BinOp",
            Expr::UnaryOp(..) => "UnaryOp",
            Expr::BoolOp(..) => "BoolOp",
            Expr::Compare { .. } => "Compare",
            Expr::Call { .. } => "Call",
            Expr::Attribute(..) => "Attribute",
            Expr::Subscript(..) => "Subscript",
            Expr::Slice { .. } => "Slice",
            Expr::List(_) => "List",
            Expr::Tuple(_) => "Tuple",
            Expr::Dict(_) => "Dict",
        }
    }

    pub fn name(id: impl Into<Ident>) -> Self {
        Expr::Name(id.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant(Constant::Int(value))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Constant(Constant::Str {
            value: value.into(),
            kind: StrKind::Plain,
        })
    }
}

/// `name=value` argument in a call
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub arg: Ident,
    pub value: Spanned<Expr>,
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Str { value: String, kind: StrKind },
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    Bytes(Vec<u8>),
    Ellipsis,
}

impl Constant {
    pub fn type_name(&self) -> &'static str {
        match self {
            Constant::Str { .. } => "str",
            Constant::Int(_) => "int",
            Constant::Float(_) => "float",
            Constant::Bool(_) => "bool",
            Constant::None => "NoneType",
            Constant::Bytes(_) => "bytes",
            Constant::Ellipsis => "ellipsis",
        }
    }
}

/// String literal flavour, chosen by the literal's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrKind {
    #[default]
    Plain,
    /// `u"c"`: a single character
    Char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMult,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mult => "*",
            BinOpKind::Div => "/",
            BinOpKind::FloorDiv => "//",
            BinOpKind::Mod => "%",
            BinOpKind::Pow => "**",
            BinOpKind::MatMult => "@",
            BinOpKind::BitAnd => "&",
            BinOpKind::BitOr => "|",
            BinOpKind::BitXor => "^",
            BinOpKind::LShift => "<<",
            BinOpKind::RShift => ">>",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Not,
    USub,
    UAdd,
    Invert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOpKind {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    In,
    NotIn,
    Is,
    IsNot,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
            CmpOp::Is => "is",
            CmpOp::IsNot => "is not",
        };
        write!(f, "{}", s)
    }
}

//! Abstract syntax tree produced by the parser.
//!
//! Every node kind named in the data model is a variant of [`Expr`]; the
//! tree is a tagged sum matched exhaustively by the interpreter instead
//! of the dynamic attribute-name dispatch the language was originally
//! implemented with (§9: "dynamic dispatch on AST kind").

use indexmap::IndexMap;
use wispc_lex::Token;
use wispc_util::Span;

/// A single expression/statement node. The grammar does not separate
/// statements from expressions: every construct produces a value (or
/// `Value::Null`), including `if`, `while`, and assignment.
#[derive(Debug, Clone)]
pub enum Expr {
    Number(Token),
    Str(Token),
    ListLit(Vec<Expr>, Span),
    VarAccess(String, Span),
    VarAssign(AssignTarget, Box<Expr>, Span),
    BinOp(Box<Expr>, BinOpKind, Box<Expr>, Span),
    UnaryOp(UnaryOpKind, Box<Expr>, Span),
    If(Vec<IfCase>, Option<Vec<Expr>>, Span),
    While(Vec<Expr>, Vec<Expr>, Span),
    For(ForLoop),
    FunctionDef(FunctionDef),
    FunctionCall(FunctionCallExpr),
    Return(Box<Expr>, Span),
    ObjectDef(ObjectDef),
    Access(Box<Expr>, Box<Expr>, Span),
    BuiltinCall(String, Vec<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Number(tok) | Expr::Str(tok) => tok.span,
            Expr::ListLit(_, s)
            | Expr::VarAccess(_, s)
            | Expr::VarAssign(_, _, s)
            | Expr::BinOp(_, _, _, s)
            | Expr::UnaryOp(_, _, s)
            | Expr::If(_, _, s)
            | Expr::While(_, _, s)
            | Expr::Return(_, s)
            | Expr::Access(_, _, s)
            | Expr::BuiltinCall(_, _, s) => *s,
            Expr::For(f) => f.span,
            Expr::FunctionDef(f) => f.span,
            Expr::FunctionCall(c) => c.span,
            Expr::ObjectDef(o) => o.span,
        }
    }
}

/// The left-hand side of an assignment: either a bare name or a dotted
/// attribute access (`a.b = v`).
#[derive(Debug, Clone)]
pub enum AssignTarget {
    Name(String),
    Access(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    IsEq,
    NEq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Pos,
    Not,
}

/// One `(conditions, body)` arm of an `if`/`elif` chain. A case passes
/// when every condition in `conditions` evaluates truthy.
#[derive(Debug, Clone)]
pub struct IfCase {
    pub conditions: Vec<Expr>,
    pub body: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct ForLoop {
    pub var_name: String,
    pub start: Box<Expr>,
    pub end: Box<Expr>,
    pub step: Box<Expr>,
    pub body: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionCallExpr {
    pub callee: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `object Name[(Parent)] { ... }`. `init` is split out into
/// `special_methods`; every other `define` goes into `methods`. Class
/// attributes (`cls x = ...`) are kept unevaluated here and evaluated
/// once, at definition time, by the interpreter.
#[derive(Debug, Clone)]
pub struct ObjectDef {
    pub name: String,
    pub parent: Option<String>,
    pub methods: IndexMap<String, FunctionDef>,
    pub special_methods: IndexMap<String, FunctionDef>,
    pub class_attrs: Vec<(String, Expr)>,
    pub span: Span,
}

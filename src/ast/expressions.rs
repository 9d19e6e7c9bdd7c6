use std::fmt::Display;

use crate::{
    lexer::tokens::Token,
    type_checker::{scope::SymbolId, type_table::TypeId},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(IntLit),
    Float(FloatLit),
    Bool(BoolLit),
    String(StringLit),
    Ident(IdentExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
}

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub value: i64,
    pub token: Token,
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLit {
    pub value: f64,
    pub token: Token,
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub token: Token,
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub token: Token,
    pub ty: Option<TypeId>,
}

/// A name used as a value, or in callee position of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentExpr {
    pub name: String,
    pub token: Token,
    pub ty: Option<TypeId>,
    pub symbol: Option<SymbolId>,
}

impl IdentExpr {
    pub fn new(token: Token) -> Self {
        IdentExpr {
            name: token.value.clone(),
            token,
            ty: None,
            symbol: None,
        }
    }
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub token: Token,
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equal,
    Unequal,
    And,
    Or,
    Xor,
    Subscript,
    MemberAccess,
}

impl BinaryOp {
    /// Operator spelling used in diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEquals => "<=",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::Unequal => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Xor => "^",
            BinaryOp::Subscript => "[]",
            BinaryOp::MemberAccess => ".",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `left op right`. `token` is the operator token.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub token: Token,
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgList {
    pub args: Vec<Expr>,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: IdentExpr,
    pub args: ArgList,
    pub token: Token,
    pub ty: Option<TypeId>,
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Int(e) => &e.token,
            Expr::Float(e) => &e.token,
            Expr::Bool(e) => &e.token,
            Expr::String(e) => &e.token,
            Expr::Ident(e) => &e.token,
            Expr::Unary(e) => &e.token,
            Expr::Binary(e) => &e.token,
            Expr::Call(e) => &e.token,
        }
    }

    /// Resolved type, absent until the semantic passes attach one.
    pub fn ty(&self) -> Option<TypeId> {
        match self {
            Expr::Int(e) => e.ty,
            Expr::Float(e) => e.ty,
            Expr::Bool(e) => e.ty,
            Expr::String(e) => e.ty,
            Expr::Ident(e) => e.ty,
            Expr::Unary(e) => e.ty,
            Expr::Binary(e) => e.ty,
            Expr::Call(e) => e.ty,
        }
    }

    pub fn set_ty(&mut self, ty: Option<TypeId>) {
        match self {
            Expr::Int(e) => e.ty = ty,
            Expr::Float(e) => e.ty = ty,
            Expr::Bool(e) => e.ty = ty,
            Expr::String(e) => e.ty = ty,
            Expr::Ident(e) => e.ty = ty,
            Expr::Unary(e) => e.ty = ty,
            Expr::Binary(e) => e.ty = ty,
            Expr::Call(e) => e.ty = ty,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Int(e) => write!(f, "{}", e.value),
            Expr::Float(e) => write!(f, "{}", e.token.value),
            Expr::Bool(e) => write!(f, "{}", e.value),
            Expr::String(e) => write!(f, "{}", e.token.display_value()),
            Expr::Ident(e) => write!(f, "{}", e.name),
            Expr::Unary(e) => write!(f, "{:?}({})", e.op, e.operand),
            Expr::Binary(e) => write!(f, "{}({}, {})", e.op, e.left, e.right),
            Expr::Call(e) => {
                write!(f, "Call({}, [", e.callee.name)?;
                for (i, arg) in e.args.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "])")
            }
        }
    }
}

use crate::{lexer::tokens::Token, type_checker::scope::SymbolId};

use super::{
    expressions::{ArgList, Expr, IdentExpr},
    types::TypeNode,
};

/// Discriminant of [`Stmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtType {
    Empty,
    Break,
    While,
    IfThen,
    IfThenElse,
    Block,
    Assign,
    Return,
    VarDecl,
    Call,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Empty(EmptyStmt),
    Break(BreakStmt),
    While(WhileStmt),
    IfThen(IfThenStmt),
    IfThenElse(IfThenElseStmt),
    Block(BlockStmt),
    Assign(AssignStmt),
    Return(ReturnStmt),
    VarDecl(VarDeclStmt),
    Call(CallStmt),
}

/// A name at its point of declaration. Never resolved as a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub value: String,
    pub token: Token,
}

impl Name {
    pub fn new(token: Token) -> Self {
        Name {
            value: token.value.clone(),
            token,
        }
    }
}

/// Placeholder for a lone `;`, removed by the cleanup pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyStmt {
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfThenStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfThenElseStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Box<Stmt>,
    pub token: Token,
}

/// `{ ... }`. `token` is the opening brace; its position names the block's scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
    pub token: Token,
}

impl BlockStmt {
    pub fn scope_name(&self) -> String {
        format!(
            "block{}:{}",
            self.token.position.line, self.token.position.column
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: IdentExpr,
    pub value: Expr,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub ty: TypeNode,
    pub name: Name,
    pub initializer: Option<Expr>,
    pub token: Token,
    pub symbol: Option<SymbolId>,
}

/// A call used as a statement: `f(a, b);`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub callee: IdentExpr,
    pub args: ArgList,
    pub token: Token,
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Empty(_) => StmtType::Empty,
            Stmt::Break(_) => StmtType::Break,
            Stmt::While(_) => StmtType::While,
            Stmt::IfThen(_) => StmtType::IfThen,
            Stmt::IfThenElse(_) => StmtType::IfThenElse,
            Stmt::Block(_) => StmtType::Block,
            Stmt::Assign(_) => StmtType::Assign,
            Stmt::Return(_) => StmtType::Return,
            Stmt::VarDecl(_) => StmtType::VarDecl,
            Stmt::Call(_) => StmtType::Call,
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            Stmt::Empty(s) => &s.token,
            Stmt::Break(s) => &s.token,
            Stmt::While(s) => &s.token,
            Stmt::IfThen(s) => &s.token,
            Stmt::IfThenElse(s) => &s.token,
            Stmt::Block(s) => &s.token,
            Stmt::Assign(s) => &s.token,
            Stmt::Return(s) => &s.token,
            Stmt::VarDecl(s) => &s.token,
            Stmt::Call(s) => &s.token,
        }
    }

    /// An empty statement, or a block containing nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Stmt::Empty(_) => true,
            Stmt::Block(block) => block.statements.is_empty(),
            _ => false,
        }
    }
}

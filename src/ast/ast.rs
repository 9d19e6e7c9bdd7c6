use crate::{lexer::tokens::Token, type_checker::scope::SymbolId};

use super::{
    statements::{BlockStmt, Name},
    types::TypeNode,
};

/// Root of the tree: the sequence of global declarations in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub globals: Vec<GlobalStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlobalStmt {
    Function(FnDef),
    Variable(GlobalVarDef),
}

impl GlobalStmt {
    pub fn token(&self) -> &Token {
        match self {
            GlobalStmt::Function(f) => &f.token,
            GlobalStmt::Variable(v) => &v.token,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeNode,
    pub name: Name,
    pub token: Token,
    pub symbol: Option<SymbolId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamList {
    pub params: Vec<Param>,
    pub token: Token,
}

/// `type name ( params ) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub return_type: TypeNode,
    pub name: Name,
    pub params: ParamList,
    pub body: BlockStmt,
    pub token: Token,
    pub symbol: Option<SymbolId>,
}

/// `type name ;` at file level.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalVarDef {
    pub ty: TypeNode,
    pub name: Name,
    pub token: Token,
    pub symbol: Option<SymbolId>,
}

use crate::{
    ast::{
        ast::{FnDef, GlobalStmt, GlobalVarDef, Param, ParamList, Program},
        expressions::{ArgList, IdentExpr},
        statements::{
            AssignStmt, BlockStmt, BreakStmt, CallStmt, EmptyStmt, IfThenElseStmt, IfThenStmt,
            Name, ReturnStmt, Stmt, VarDeclStmt, WhileStmt,
        },
        types::TypeNode,
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    MATCH, MATCH_COMMITTED,
};

use super::parser::{Match, Parser};

pub type StmtHandler = fn(&mut Parser) -> Match<Stmt>;

/// Statement alternatives in the order they are tried. `if`/`else` must come
/// after everything that could start with a name, and before blocks.
const STMT_ALTERNATIVES: [StmtHandler; 10] = [
    parse_while_stmt,
    parse_call_stmt,
    parse_break_stmt,
    parse_empty_return_stmt,
    parse_return_stmt,
    parse_var_decl_stmt,
    parse_assign_stmt,
    parse_if_stmt,
    parse_block_stmt,
    parse_empty_stmt,
];

pub fn parse_stmt(parser: &mut Parser) -> Match<Stmt> {
    for alternative in STMT_ALTERNATIVES {
        if let Some(stmt) = alternative(parser)? {
            return Ok(Some(stmt));
        }
    }
    Ok(None)
}

/// `ident` or `ident [ ]`
pub fn parse_type(parser: &mut Parser) -> Match<TypeNode> {
    let token = MATCH!(parser.match_kind(TokenKind::Identifier));

    let production = parser.production();
    let is_array = parser
        .attempt(production, |p| {
            MATCH!(p.match_kind(TokenKind::OpenBracket));
            MATCH!(p.match_kind(TokenKind::CloseBracket));
            Ok(Some(()))
        })?
        .is_some();

    Ok(Some(TypeNode::new(token, is_array)))
}

fn parse_name(parser: &mut Parser) -> Option<Name> {
    parser.match_kind(TokenKind::Identifier).map(Name::new)
}

fn parse_ident(parser: &mut Parser) -> Option<IdentExpr> {
    parser
        .match_kind(TokenKind::Identifier)
        .map(IdentExpr::new)
}

/// `while ( expr ) stmt`, committed once `while` is read.
pub fn parse_while_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("while statement", |p| {
        let token = MATCH!(p.match_kind(TokenKind::While));

        MATCH_COMMITTED!(p, p.match_kind(TokenKind::OpenParen));
        let condition = MATCH_COMMITTED!(p, p.match_expression());
        MATCH_COMMITTED!(p, p.match_kind(TokenKind::CloseParen));
        let body = MATCH_COMMITTED!(p, parse_stmt(p)?);

        Ok(Some(Stmt::While(WhileStmt {
            condition,
            body: Box::new(body),
            token,
        })))
    })
}

/// `ident ( args ) ;`
pub fn parse_call_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("call statement", |p| {
        let callee = MATCH!(parse_ident(p));
        let open = MATCH!(p.match_kind(TokenKind::OpenParen));
        let args = MATCH!(parse_arg_list(p, open)?);
        MATCH!(p.match_kind(TokenKind::CloseParen));
        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(Stmt::Call(CallStmt {
            token: callee.token.clone(),
            callee,
            args,
        })))
    })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("break statement", |p| {
        let token = MATCH!(p.match_kind(TokenKind::Break));
        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(Stmt::Break(BreakStmt { token })))
    })
}

/// `return ;`
pub fn parse_empty_return_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("return statement", |p| {
        let token = MATCH!(p.match_kind(TokenKind::Return));
        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(Stmt::Return(ReturnStmt { value: None, token })))
    })
}

/// `return expr ;`
pub fn parse_return_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("return statement", |p| {
        let token = MATCH!(p.match_kind(TokenKind::Return));
        let value = MATCH!(p.match_expression());
        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(Stmt::Return(ReturnStmt {
            value: Some(value),
            token,
        })))
    })
}

/// `type ident ( = expr )? ;`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("variable declaration", |p| {
        let ty = MATCH!(parse_type(p)?);
        let name = MATCH!(parse_name(p));

        let initializer = p.attempt("variable declaration", |p| {
            MATCH!(p.match_kind(TokenKind::Assignment));
            let value = MATCH!(p.match_expression());
            Ok(Some(value))
        })?;

        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(Stmt::VarDecl(VarDeclStmt {
            token: ty.token.clone(),
            ty,
            name,
            initializer,
            symbol: None,
        })))
    })
}

/// `ident = expr ;`
pub fn parse_assign_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("assignment", |p| {
        let target = MATCH!(parse_ident(p));
        MATCH!(p.match_kind(TokenKind::Assignment));
        let value = MATCH!(p.match_expression());
        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(Stmt::Assign(AssignStmt {
            token: target.token.clone(),
            target,
            value,
        })))
    })
}

/// `if ( expr ) stmt` with an optional `else stmt`.
///
/// The prefix is parsed once and commits after `if (`. A following `else`
/// commits to the else branch, so a dangling `else` binds to the innermost `if`.
pub fn parse_if_stmt(parser: &mut Parser) -> Match<Stmt> {
    if parser.current_token_kind() != TokenKind::If {
        return Ok(None);
    }

    parser.attempt("if statement", |p| {
        let token = MATCH!(p.match_kind(TokenKind::If));
        MATCH!(p.match_kind(TokenKind::OpenParen));
        let condition = MATCH_COMMITTED!(p, p.match_expression());
        MATCH_COMMITTED!(p, p.match_kind(TokenKind::CloseParen));
        let then_branch = MATCH_COMMITTED!(p, parse_stmt(p)?);

        if p.current_token_kind() != TokenKind::Else {
            return Ok(Some(Stmt::IfThen(IfThenStmt {
                condition,
                then_branch: Box::new(then_branch),
                token,
            })));
        }

        let else_branch = p.attempt("if-else statement", |p| {
            MATCH!(p.match_kind(TokenKind::Else));
            Ok(Some(MATCH_COMMITTED!(p, parse_stmt(p)?)))
        })?;
        let else_branch = MATCH_COMMITTED!(p, else_branch);

        Ok(Some(Stmt::IfThenElse(IfThenElseStmt {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            token,
        })))
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Match<Stmt> {
    Ok(parse_block(parser)?.map(Stmt::Block))
}

/// A lone `;`.
pub fn parse_empty_stmt(parser: &mut Parser) -> Match<Stmt> {
    parser.attempt("empty statement", |p| {
        let token = MATCH!(p.match_kind(TokenKind::Semicolon));
        Ok(Some(Stmt::Empty(EmptyStmt { token })))
    })
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Match<BlockStmt> {
    parser.attempt("statement block", |p| {
        let token = MATCH!(p.match_kind(TokenKind::OpenCurly));

        let mut statements = vec![];
        while let Some(stmt) = parse_stmt(p)? {
            statements.push(stmt);
        }

        MATCH!(p.match_kind(TokenKind::CloseCurly));
        Ok(Some(BlockStmt { statements, token }))
    })
}

/// `expr ( , expr )*`, or nothing. Always matches.
pub fn parse_arg_list(parser: &mut Parser, open: Token) -> Match<ArgList> {
    let args = parser.attempt("argument list", |p| {
        let mut args = vec![MATCH!(p.match_expression())];

        while let Some(arg) = p.attempt("argument list", |p| {
            MATCH!(p.match_kind(TokenKind::Comma));
            let arg = MATCH!(p.match_expression());
            Ok(Some(arg))
        })? {
            args.push(arg);
        }

        Ok(Some(args))
    })?;

    Ok(Some(ArgList {
        args: args.unwrap_or_default(),
        token: open,
    }))
}

/// `type ident`
pub fn parse_param(parser: &mut Parser) -> Match<Param> {
    parser.attempt("parameter", |p| {
        let ty = MATCH!(parse_type(p)?);
        let name = MATCH!(parse_name(p));

        Ok(Some(Param {
            token: ty.token.clone(),
            ty,
            name,
            symbol: None,
        }))
    })
}

/// `param ( , param )*`, or nothing. Always matches.
pub fn parse_param_list(parser: &mut Parser, open: Token) -> Match<ParamList> {
    let params = parser.attempt("parameter list", |p| {
        let mut params = vec![MATCH!(parse_param(p)?)];

        while let Some(param) = p.attempt("parameter list", |p| {
            MATCH!(p.match_kind(TokenKind::Comma));
            let param = MATCH!(parse_param(p)?);
            Ok(Some(param))
        })? {
            params.push(param);
        }

        Ok(Some(params))
    })?;

    Ok(Some(ParamList {
        params: params.unwrap_or_default(),
        token: open,
    }))
}

/// `type ident ( params ) block`
pub fn parse_fn_def(parser: &mut Parser) -> Match<GlobalStmt> {
    parser.attempt("function definition", |p| {
        let return_type = MATCH!(parse_type(p)?);
        let name = MATCH!(parse_name(p));
        let open = MATCH!(p.match_kind(TokenKind::OpenParen));
        let params = MATCH!(parse_param_list(p, open)?);
        MATCH!(p.match_kind(TokenKind::CloseParen));
        let body = MATCH!(parse_block(p)?);

        Ok(Some(GlobalStmt::Function(FnDef {
            token: return_type.token.clone(),
            return_type,
            name,
            params,
            body,
            symbol: None,
        })))
    })
}

/// `type ident ;`
pub fn parse_global_var(parser: &mut Parser) -> Match<GlobalStmt> {
    parser.attempt("global variable declaration", |p| {
        let ty = MATCH!(parse_type(p)?);
        let name = MATCH!(parse_name(p));
        MATCH!(p.match_kind(TokenKind::Semicolon));

        Ok(Some(GlobalStmt::Variable(GlobalVarDef {
            token: ty.token.clone(),
            ty,
            name,
            symbol: None,
        })))
    })
}

pub fn parse_global(parser: &mut Parser) -> Match<GlobalStmt> {
    if let Some(function) = parse_fn_def(parser)? {
        return Ok(Some(function));
    }
    parse_global_var(parser)
}

/// `global*` followed by the end of input. Anything left over is reported at
/// the furthest token any alternative reached.
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let mut globals = vec![];
    while let Some(global) = parse_global(parser)? {
        globals.push(global);
    }

    if parser.is_at_end() {
        Ok(Program { globals })
    } else {
        Err(parser.syntax_error())
    }
}

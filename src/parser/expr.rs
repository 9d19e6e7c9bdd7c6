use crate::{
    ast::expressions::{
        ArgList, BinaryExpr, BinaryOp, BoolLit, CallExpr, Expr, FloatLit, IdentExpr, IntLit,
        StringLit, UnaryExpr, UnaryOp,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

fn unexpected(token: &Token, message: &str) -> Error {
    Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: token.display_value(),
            message: message.to_string(),
        },
        token.position,
    )
}

/// Precedence climbing: one prefix handler, then infix handlers for as long
/// as the next token binds tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            let token = parser.advance();
            return Err(unexpected(token, "expected an expression"));
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Int(IntLit {
                value,
                token,
                ty: None,
            })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.position,
            )),
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Ok(Expr::Float(FloatLit {
                value,
                token,
                ty: None,
            })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.position,
            )),
        },
        TokenKind::Bool => Ok(Expr::Bool(BoolLit {
            value: token.value == "true",
            token,
            ty: None,
        })),
        TokenKind::String => Ok(Expr::String(StringLit {
            value: token.value.clone(),
            token,
            ty: None,
        })),
        TokenKind::Identifier => Ok(Expr::Ident(IdentExpr::new(token))),
        _ => Err(unexpected(&token, "expected a literal or a name")),
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::LessEquals => BinaryOp::LessEquals,
        TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
        TokenKind::Equals => BinaryOp::Equal,
        TokenKind::NotEquals => BinaryOp::Unequal,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Xor => BinaryOp::Xor,
        _ => return None,
    };
    Some(op)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = match binary_op(operator_token.kind) {
        Some(op) => op,
        None => return Err(unexpected(&operator_token, "expected an operator")),
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
        token: operator_token,
        ty: None,
    }))
}

/// `-x`, `!x`, `~x` and `+x`. Unary plus yields its operand unchanged.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Primary)?;

    let op = match operator_token.kind {
        TokenKind::Plus => return Ok(operand),
        TokenKind::Dash => UnaryOp::Neg,
        _ => UnaryOp::Not,
    };

    Ok(Expr::Unary(UnaryExpr {
        op,
        operand: Box::new(operand),
        token: operator_token,
        ty: None,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `callee(args)`. Only a plain name can be called.
pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    let callee = match left {
        Expr::Ident(ident) => ident,
        other => return Err(unexpected(other.token(), "only a name can be called")),
    };

    let mut args = vec![];
    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token: callee.token.clone(),
        callee,
        args: ArgList { args, token: open },
        ty: None,
    }))
}

pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let open = parser.advance().clone();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Binary(BinaryExpr {
        op: BinaryOp::Subscript,
        left: Box::new(left),
        right: Box::new(index),
        token: open,
        ty: None,
    }))
}

/// `left.member`. The member is parsed at primary strength so that chains
/// group to the left: `a.b.c` is `(a.b).c`.
pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator = parser.advance().clone();

    if parser.current_token_kind() != TokenKind::Identifier {
        let token = parser.advance();
        return Err(unexpected(token, "expected a member name after '.'"));
    }
    let member = parse_expr(parser, BindingPower::Primary)?;

    Ok(Expr::Binary(BinaryExpr {
        op: BinaryOp::MemberAccess,
        left: Box::new(left),
        right: Box::new(member),
        token: operator,
        ty: None,
    }))
}

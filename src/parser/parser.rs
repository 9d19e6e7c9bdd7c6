//! Parser context and entry points.
//!
//! The [`Parser`] bundles the token cursor, the name of the production being
//! matched and the expression lookup tables. Every production function takes
//! it explicitly; there is no parser state outside of it.
//!
//! Productions return [`Match`]: `Ok(Some(node))` on success, `Ok(None)` when
//! the alternative does not apply (the caller restores the cursor and tries the
//! next one) and `Err` only once a committed production has failed.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{ast::Program, expressions::Expr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    cursor::TokenCursor,
    expr::parse_expr,
    lookups::{create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup},
    stmt::parse_program,
};

pub type Match<T> = Result<Option<T>, Error>;

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    /// Production currently being matched, recorded on every token read.
    production: &'static str,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for left binding powers
    binding_power_lookup: BPLookup,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let mut parser = Parser {
            cursor: TokenCursor::new(tokens, "program"),
            production: "program",
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    pub fn current_token(&self) -> &'a Token {
        self.cursor.current()
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> &'a Token {
        self.cursor.next(self.production)
    }

    /// Consumes the current token, failing if it is not of `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<&'a Token, Error> {
        let token = self.advance();
        if token.kind == expected_kind {
            Ok(token)
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.display_value(),
                    message: format!("expected {}", expected_kind),
                },
                token.position,
            ))
        }
    }

    /// Consumes the current token and yields it if it is of kind `kind`.
    pub fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.advance();
        (token.kind == kind).then(|| token.clone())
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub fn production(&self) -> &'static str {
        self.production
    }

    /// Runs one alternative of `production` speculatively.
    ///
    /// The cursor is restored when the alternative does not match and kept
    /// otherwise. Errors pass through untouched.
    pub fn attempt<T>(
        &mut self,
        production: &'static str,
        alternative: impl FnOnce(&mut Parser<'a>) -> Match<T>,
    ) -> Match<T> {
        let outer = std::mem::replace(&mut self.production, production);
        self.cursor.mark();

        let result = alternative(self);
        match &result {
            Ok(None) => {
                trace!(production, index = self.cursor.index(), "alternative rejected");
                self.cursor.reset();
            }
            _ => self.cursor.discard(),
        }

        self.production = outer;
        result
    }

    /// Parses an expression speculatively. A failure anywhere inside it
    /// restores the cursor and reports no match.
    pub fn match_expression(&mut self) -> Option<Expr> {
        let outer = std::mem::replace(&mut self.production, "expression");
        self.cursor.mark();

        let result = match parse_expr(self, BindingPower::Default) {
            Ok(expr) => {
                self.cursor.discard();
                Some(expr)
            }
            Err(error) => {
                trace!(%error, "expression rejected");
                self.cursor.reset();
                None
            }
        };

        self.production = outer;
        result
    }

    /// The diagnostic for a failed parse, located at the furthest token read.
    pub fn syntax_error(&self) -> Error {
        let (previous, furthest, production) = self.cursor.error_info();

        let error = if furthest.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEndOfFile {
                production: production.to_string(),
            }
        } else if let Some(previous) = previous {
            ErrorImpl::UnexpectedTokenAfter {
                token: furthest.display_value(),
                previous: previous.display_value(),
                production: production.to_string(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                token: furthest.display_value(),
                production: production.to_string(),
            }
        };

        Error::new(error, furthest.position)
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token. Prefix use
    /// does not give the token a left binding power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a whole program. The token slice must end with `EOF`.
pub fn parse(tokens: &[Token]) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens);
    let program = parse_program(&mut parser)?;

    debug!(globals = program.globals.len(), "parsing finished");
    Ok(program)
}

/// Parses a single expression spanning all of `tokens`.
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, Error> {
    let mut parser = Parser::new(tokens);
    parser.production = "expression";

    let expr = parse_expr(&mut parser, BindingPower::Default)?;
    if !parser.is_at_end() {
        parser.advance();
        return Err(parser.syntax_error());
    }

    Ok(expr)
}

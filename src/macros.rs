//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed operators
//! - `MATCH!` / `MATCH_COMMITTED!` - Sequence steps inside a grammar alternative
//! - `visitor_hooks!` - Default enter/leave pairs for the AST visitor
//!
//! These macros reduce boilerplate in the lexer, parser and visitor.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42", position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        $crate::lexer::tokens::Token::new($kind, $value, $position)
    };
}

/// Creates a default lexer handler for fixed-text operator tokens.
///
/// Generates a handler function that pushes a token with the given kind at the
/// lexer's current position and advances past the operator text.
///
/// ```ignore
/// (r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "=="))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer, _matched| {
            let position = lexer.position();
            lexer.push(MK_TOKEN!($kind, $value, position));
            lexer.advance_n($value.len());
            Ok(())
        }
    };
}

/// Unwraps one step of a grammar alternative.
///
/// A missing match abandons the alternative with `Ok(None)` so the caller can
/// restore the cursor and try the next one.
#[macro_export]
macro_rules! MATCH {
    ($e:expr) => {
        match $e {
            Some(value) => value,
            None => return Ok(None),
        }
    };
}

/// Like `MATCH!`, but for steps after the alternative has committed: a missing
/// match becomes a fatal syntax error at the furthest token read.
#[macro_export]
macro_rules! MATCH_COMMITTED {
    ($parser:expr, $e:expr) => {
        match $e {
            Some(value) => value,
            None => return Err($parser.syntax_error()),
        }
    };
}

/// Declares `enter`/`leave` hook pairs with the structural default behaviour:
/// enter continues into the children, leave does nothing.
#[macro_export]
macro_rules! visitor_hooks {
    ($($enter:ident, $leave:ident => $node:ty;)*) => {
        $(
            fn $enter(&mut self, _node: &mut $node, _last: bool) -> bool {
                true
            }
            fn $leave(&mut self, _node: &mut $node, _last: bool) {}
        )*
    };
}

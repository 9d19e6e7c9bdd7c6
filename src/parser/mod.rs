//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree:
//!
//! - Expressions use precedence climbing with NUD (null denotation) and LED
//!   (left denotation) handlers registered per token kind, plus a binding
//!   power per infix token.
//! - Statements, declarations and the program use recursive descent over
//!   ordered alternatives. A failed alternative rewinds the token cursor and
//!   the next one is tried; some productions commit after their first keyword
//!   so later failures are reported immediately.
//! - Errors are reported at the furthest token any alternative reached.

pub mod cursor;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("let", TokenKind::Let);
        map.insert("break", TokenKind::Break);
        map.insert("return", TokenKind::Return);
        map.insert("class", TokenKind::Class);
        map.insert("method", TokenKind::Method);
        map.insert("function", TokenKind::Function);
        map.insert("constructor", TokenKind::Constructor);
        map.insert("static", TokenKind::Static);
        map.insert("field", TokenKind::Field);
        map.insert("null", TokenKind::Null);
        map.insert("this", TokenKind::This);
        map.insert("true", TokenKind::Bool);
        map.insert("false", TokenKind::Bool);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Int,
    Float,
    Bool,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // ! or ~
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Xor,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Var,
    If,
    Then,
    Else,
    While,
    Do,
    Let,
    Break,
    Return,
    Class,
    Method,
    Function,
    Constructor,
    Static,
    Field,
    Null,
    This,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_value())
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            position,
        }
    }

    /// The lexeme as it would appear in source. String literals are re-quoted.
    pub fn display_value(&self) -> String {
        match self.kind {
            TokenKind::String => format!("\"{}\"", self.value),
            _ => self.value.clone(),
        }
    }

    pub fn debug(&self) -> String {
        format!(
            "{:<16}{:<14.12}{}",
            self.kind.to_string(),
            self.display_value(),
            self.position
        )
    }
}

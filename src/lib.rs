#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorTip},
    lexer::tokens::{Token, TokenKind},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod pipeline;
pub mod type_checker;

extern crate regex;

/// 1-based source position. Orders by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Rebuilds the source line of `position` from the tokens on it, joined by single
/// spaces. Returns the text and the caret offset of the token at `position`
/// (the end of the line when no token starts there).
pub fn get_line_from_tokens(tokens: &[Token], position: Position) -> (String, usize) {
    let mut text = String::new();
    let mut caret = None;

    for token in tokens
        .iter()
        .filter(|t| t.position.line == position.line && t.kind != TokenKind::EOF)
    {
        if !text.is_empty() {
            text.push(' ');
        }
        if token.position == position {
            caret = Some(text.chars().count());
        }
        text.push_str(&token.display_value());
    }

    let caret = caret.unwrap_or_else(|| text.chars().count());
    (text, caret)
}

/// Returns the raw source line at `position` and the caret offset for its column.
pub fn get_line_from_source(source: &str, position: Position) -> (String, usize) {
    let line = source
        .lines()
        .nth(position.line.saturating_sub(1) as usize)
        .unwrap_or_default();

    (line.to_string(), position.column.saturating_sub(1) as usize)
}

fn render(error: &Error, file: &str, line_text: &str, caret: usize) -> String {
    /*
        Error: name (tip)
        -> final.sc:20:9
        unknown token found during lexing: "#"
           |
        20 | int a = # ;
           | --------^
    */

    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;
    let arrows = caret + 1;

    let mut out = String::new();
    match error.get_tip() {
        ErrorTip::None => out.push_str(&format!("Error: {}\n", error.get_error_name())),
        tip => out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), tip)),
    }
    out.push_str(&format!("-> {}:{}\n", file, position));
    out.push_str(&format!("{}\n", error.get_impl()));
    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text));
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

/// Renders a diagnostic produced after lexing, rebuilding its source line from
/// the token stream.
pub fn render_diagnostic(error: &Error, tokens: &[Token], file: &str) -> String {
    let (line_text, caret) = get_line_from_tokens(tokens, error.get_position());
    render(error, file, &line_text, caret)
}

/// Renders a lexical error. No tokens exist yet, so the raw source line is used.
pub fn render_lexical_error(error: &Error, source: &str, file: &str) -> String {
    let (line_text, caret) = get_line_from_source(source, error.get_position());
    render(error, file, &line_text, caret)
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::lexer::tokenize,
        Position,
    };

    #[test]
    fn test_get_line_from_tokens() {
        let tokens = tokenize("int x;\nint y = \"a\" + z;\n").unwrap();

        let (line, caret) = super::get_line_from_tokens(&tokens, Position::new(2, 15));
        assert_eq!(line, "int y = \"a\" + z ;");
        assert_eq!(caret, 14);
    }

    #[test]
    fn test_get_line_from_source() {
        let (line, caret) =
            super::get_line_from_source("Hello, world!\n\n\nTesting { }\n", Position::new(4, 9));
        assert_eq!(line, "Testing { }");
        assert_eq!(caret, 8);
    }

    #[test]
    fn test_render_diagnostic() {
        let tokens = tokenize("void main() {\n  int x = y;\n}").unwrap();
        let error = Error::new(
            ErrorImpl::UnknownSymbol { symbol: "y".into() },
            Position::new(2, 11),
        );

        let rendered = super::render_diagnostic(&error, &tokens, "main.sc");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: UnknownSymbol");
        assert_eq!(lines[1], "-> main.sc:2:11");
        assert_eq!(lines[2], "unknown symbol 'y'");
        assert_eq!(lines[4], "2 | int x = y ;");
        assert_eq!(lines[5], "  | --------^");
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 4));
        assert_eq!(Position::new(5, 5).to_string(), "5:5");
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Receives the lexer positioned at the start of the match and the matched text.
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("lexer pattern must compile"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so longer
    // operators come before their prefixes and comments before `/`.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^//[^\n]*", skip_handler),
        pattern(r"(?s)^/\*.*?(\*/|\z)", skip_handler),
        pattern(r"^[a-zA-Z_$][a-zA-Z0-9_$]*", symbol_handler),
        pattern(r"^[0-9]+(\.[0-9]+)?", number_handler),
        pattern(r#"^"(\\.|[^"\\])*""#, string_handler),
        pattern(r#"^""#, unterminated_string_handler),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern(r"^\^", MK_DEFAULT_HANDLER!(TokenKind::Xor, "^")),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern(r"^~", MK_DEFAULT_HANDLER!(TokenKind::Not, "~")),
    ];
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Moves the cursor `n` bytes forward, keeping the line bookkeeping current.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for (offset, c) in self.source[self.pos..end].char_indices() {
            if c == '\n' {
                self.line += 1;
                self.line_start = self.pos + offset + 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// 1-based position of the cursor. Columns count characters, not bytes.
    pub fn position(&self) -> Position {
        let column = self.source[self.line_start..self.pos].chars().count() as u32 + 1;
        Position {
            line: self.line,
            column,
        }
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let position = lexer.position();
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, matched, position));
    lexer.advance_n(matched.len());
    Ok(())
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let position = lexer.position();
    lexer.advance_n(matched.len());

    if let Some(suffix) = lexer.at() {
        if suffix.is_ascii_alphabetic() || suffix == '_' || suffix == '$' {
            return Err(Error::new(
                ErrorImpl::InvalidNumberSuffix { suffix },
                lexer.position(),
            ));
        }
    }

    let kind = if matched.contains('.') {
        TokenKind::Float
    } else {
        TokenKind::Int
    };
    if kind == TokenKind::Int && matched.parse::<i64>().is_err() {
        return Err(Error::new(
            ErrorImpl::NumberParseError {
                token: matched.to_string(),
            },
            position,
        ));
    }
    lexer.push(MK_TOKEN!(kind, matched, position));
    Ok(())
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let position = lexer.position();
    let literal = unescape(&matched[1..matched.len() - 1]);

    lexer.push(MK_TOKEN!(TokenKind::String, literal, position));
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) -> Result<(), Error> {
    Err(Error::new(ErrorImpl::UnterminatedString, lexer.position()))
}

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let decoded = match chars.peek().copied() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('0') => '\0',
            // Unknown escapes keep the backslash.
            _ => {
                result.push(ch);
                continue;
            }
        };
        result.push(decoded);
        chars.next();
    }

    result
}

/// Splits `source` into tokens, ending with a synthetic `EOF` token placed one
/// past the end of the input. Stops at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    'outer: while !lex.at_eof() {
        for pattern in PATTERNS.iter() {
            let matched = match pattern.regex.find(lex.remainder()) {
                Some(found) if !found.as_str().is_empty() => found.as_str(),
                _ => continue,
            };

            (pattern.handler)(&mut lex, matched)?;
            continue 'outer;
        }

        let token = lex.at().map(String::from).unwrap_or_default();
        return Err(Error::new(
            ErrorImpl::UnrecognisedToken { token },
            lex.position(),
        ));
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, "EOF", position));
    debug!(tokens = lex.tokens.len(), "lexing finished");
    Ok(lex.tokens)
}

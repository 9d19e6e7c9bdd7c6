use crate::lexer::tokens::{Token, TokenKind};

/// Backtracking reader over a token slice.
///
/// Speculative parses `mark` the current index and later either `reset` to it
/// or `discard` it; marks nest. Independently of backtracking, the cursor
/// remembers the furthest token ever read and the production that read it,
/// which is where a failed parse is reported.
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    index: usize,
    marks: Vec<usize>,
    furthest: usize,
    furthest_production: &'static str,
}

impl<'a> TokenCursor<'a> {
    /// `tokens` must end with an `EOF` token.
    pub fn new(tokens: &'a [Token], production: &'static str) -> Self {
        TokenCursor {
            tokens,
            index: 0,
            marks: vec![],
            furthest: 0,
            furthest_production: production,
        }
    }

    pub fn mark(&mut self) {
        self.marks.push(self.index);
    }

    /// Returns to the most recent mark and drops it.
    pub fn reset(&mut self) {
        if let Some(index) = self.marks.pop() {
            self.index = index;
        }
    }

    /// Drops the most recent mark, keeping the current index.
    pub fn discard(&mut self) {
        self.marks.pop();
    }

    pub fn current(&self) -> &'a Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Reads the current token on behalf of `production` and moves past it.
    /// The trailing `EOF` is never moved past.
    pub fn next(&mut self, production: &'static str) -> &'a Token {
        if self.furthest < self.index {
            self.furthest = self.index;
            self.furthest_production = production;
        }

        let token = self.current();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn furthest_token(&self) -> &'a Token {
        &self.tokens[self.furthest]
    }

    /// The token before the furthest one (if any), the furthest token, and
    /// the production that read it.
    pub fn error_info(&self) -> (Option<&'a Token>, &'a Token, &'static str) {
        let previous = if self.furthest > 0 {
            Some(&self.tokens[self.furthest - 1])
        } else {
            None
        };

        (previous, self.furthest_token(), self.furthest_production)
    }

    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::EOF
    }
}

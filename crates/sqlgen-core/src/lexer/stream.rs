//! A replayable token cursor over the lexer.

use super::{Lexer, Token};

/// Buffers tokens from a [`Lexer`] so the grammar engine can backtrack.
///
/// Tokens are scanned lazily the first time a position is reached. The
/// stream remembers the furthest position ever examined, which is where
/// syntax errors are reported.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    buffer: Vec<Token>,
    pos: usize,
    furthest: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            buffer: Vec::new(),
            pos: 0,
            furthest: 0,
        }
    }

    /// Returns the text being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.lexer.source()
    }

    /// Returns the current position, usable with [`TokenStream::rewind`].
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor back (or forward) to a previously returned position.
    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns the furthest position that was examined.
    #[must_use]
    pub const fn furthest(&self) -> usize {
        self.furthest
    }

    fn fill(&mut self, pos: usize) {
        while self.buffer.len() <= pos {
            if self.buffer.last().is_some_and(Token::is_eof) {
                break;
            }
            let token = self.lexer.next_token();
            self.buffer.push(token);
        }
    }

    /// Returns the token at `pos`. Positions past the end yield the EOF token.
    pub fn token_at(&mut self, pos: usize) -> &Token {
        self.fill(pos);
        let index = pos.min(self.buffer.len() - 1);
        &self.buffer[index]
    }

    /// Returns the current token without consuming it.
    pub fn peek(&mut self) -> &Token {
        let pos = self.pos;
        if pos > self.furthest {
            self.furthest = pos;
        }
        self.token_at(pos)
    }

    /// Consumes the current token. The cursor never moves past EOF.
    pub fn advance(&mut self) {
        if !self.peek().is_eof() {
            self.pos += 1;
        }
    }

    /// Returns true when the cursor sits on the EOF token.
    pub fn at_end(&mut self) -> bool {
        self.peek().is_eof()
    }
}
